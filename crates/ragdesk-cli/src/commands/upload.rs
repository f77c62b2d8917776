use std::path::Path;

use anyhow::{Context, Result};
use ragdesk_application::AppShell;
use ragdesk_core::route::Route;

use crate::output;

pub async fn run(shell: &AppShell, file: &Path) -> Result<()> {
    let filename = file
        .file_name()
        .and_then(|name| name.to_str())
        .context("Upload path has no file name")?
        .to_string();
    let content = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let rendered = shell.upload(filename, content).await?;
    output::print_rendered(&rendered);

    let rendered = super::open::settled(shell, shell.navigate(Route::Documents).await).await?;
    output::print_rendered(&rendered);
    Ok(())
}
