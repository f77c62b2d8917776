use anyhow::Result;
use ragdesk_application::pages::PageAction;
use ragdesk_application::{AppShell, ConfigTab, Rendered};

use crate::output;

pub async fn path(shell: &AppShell, path: &str) -> Result<()> {
    let rendered = settled(shell, shell.navigate_path(path).await).await?;
    output::print_rendered(&rendered);
    Ok(())
}

pub async fn config(shell: &AppShell, tab: ConfigTab) -> Result<()> {
    let rendered = settled(shell, shell.navigate_path("/config").await).await?;
    if rendered.redirected || tab == ConfigTab::Embedder {
        output::print_rendered(&rendered);
        return Ok(());
    }

    let rendered = shell.dispatch(PageAction::SelectTab(tab)).await?;
    output::print_rendered(&rendered);
    Ok(())
}

/// Waits for the page's background fetches so the printed screen is final.
///
/// Redirects and unknown paths are returned as they are.
pub async fn settled(shell: &AppShell, rendered: Rendered) -> Result<Rendered> {
    if rendered.redirected || rendered.shown.is_none() {
        return Ok(rendered);
    }
    Ok(shell.settle().await?)
}
