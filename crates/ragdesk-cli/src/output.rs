//! Terminal rendering of shell output.

use std::fmt::Write;

use colored::Colorize;
use ragdesk_application::pages::{ConfigView, DocumentsView, ListState, UploadView};
use ragdesk_application::{
    AccountAffordance, HealthDisplay, PanelSource, Rendered, ScreenBody, Sidebar,
    SubsystemPanel, TabPanel,
};
use ragdesk_telemetry::NoticeReceiver;
use serde::Serialize;

pub fn print_rendered(rendered: &Rendered) {
    print!("{}", format_rendered(rendered));
}

/// Prints the warnings and errors logged while the command ran.
pub fn print_notices(notices: &mut NoticeReceiver) {
    while let Ok(notice) = notices.try_recv() {
        let line = format!("[{}] {}", notice.level, notice.message);
        if notice.is_error() {
            eprintln!("{}", line.red());
        } else {
            eprintln!("{}", line.yellow());
        }
    }
}

pub fn format_rendered(rendered: &Rendered) -> String {
    let mut out = String::new();
    if rendered.redirected {
        let _ = writeln!(
            out,
            "{}",
            format!("{} requires sign-in, showing the login page", rendered.requested).yellow()
        );
    }
    format_sidebar(&mut out, &rendered.sidebar);
    let _ = writeln!(out, "\n{}", rendered.screen.title.bold());
    format_body(&mut out, &rendered.screen.body);
    out
}

fn format_sidebar(out: &mut String, sidebar: &Sidebar) {
    let items: Vec<String> = sidebar
        .items
        .iter()
        .map(|item| {
            if item.active {
                format!("[{}]", item.title).cyan().bold().to_string()
            } else {
                item.title.to_string()
            }
        })
        .collect();
    let account = match &sidebar.account {
        AccountAffordance::SignIn { login, signup } => {
            format!("Sign in ({login}) | Sign up ({signup})")
        }
        AccountAffordance::SignOut { display_name } => format!("{display_name} | Sign out"),
    };
    let _ = writeln!(out, "{}  {}", items.join("  "), account.dimmed());
}

fn format_body(out: &mut String, body: &ScreenBody) {
    match body {
        ScreenBody::Placeholder { description } => {
            let _ = writeln!(out, "{}", description.dimmed());
        }
        ScreenBody::Upload(view) => format_upload(out, view),
        ScreenBody::Documents(view) => format_documents(out, view),
        ScreenBody::Config(view) => format_config(out, view),
        ScreenBody::Health(display) => format_health(out, display),
        ScreenBody::NotFound { path } => {
            let _ = writeln!(out, "{}", format!("No page at {path}").red());
        }
        ScreenBody::Failed { message } => {
            let _ = writeln!(out, "{}", format!("Something went wrong: {message}").red());
        }
    }
}

fn format_upload(out: &mut String, view: &UploadView) {
    if let Some(upload) = &view.last_upload {
        let _ = writeln!(
            out,
            "{}",
            format!(
                "Uploaded {} ({} chunks, id {})",
                upload.filename, upload.chunks_created, upload.document_id
            )
            .green()
        );
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "{}", format!("Upload failed: {error}").red());
    }
    if view.last_upload.is_none() && view.error.is_none() {
        let _ = writeln!(out, "{}", "Choose a file to upload.".dimmed());
    }
}

fn format_documents(out: &mut String, view: &DocumentsView) {
    match &view.list {
        ListState::Loading => {
            let _ = writeln!(out, "Loading documents...");
        }
        ListState::Failed(message) => {
            let _ = writeln!(out, "{}", format!("Could not load documents: {message}").red());
        }
        ListState::Loaded(documents) if documents.is_empty() => {
            let _ = writeln!(out, "{}", "No documents indexed yet.".dimmed());
        }
        ListState::Loaded(documents) => {
            for document in documents {
                let uploaded = document
                    .uploaded_at
                    .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "{:<40} {:>6} chunks  {}",
                    document.filename, document.chunk_count, uploaded
                );
            }
        }
    }
}

fn format_config(out: &mut String, view: &ConfigView) {
    let tabs: Vec<String> = view
        .tabs
        .iter()
        .map(|tab| {
            if *tab == view.active {
                format!("[{}]", tab.label()).cyan().bold().to_string()
            } else {
                tab.label().to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join("  "));

    match &view.panel {
        TabPanel::Loading(_) => {
            let _ = writeln!(out, "Loading configuration...");
        }
        TabPanel::Embedder { config, source } => format_section(out, config, *source),
        TabPanel::VectorDb { config, source } => format_section(out, config, *source),
        TabPanel::Chat(settings) => format_section(out, settings, PanelSource::Defaults),
        TabPanel::Prompts(settings) => format_section(out, settings, PanelSource::Defaults),
    }
}

fn format_section<T: Serialize>(out: &mut String, value: &T, source: PanelSource) {
    if source == PanelSource::Defaults {
        let _ = writeln!(out, "{}", "(defaults)".dimmed());
    }
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let _ = writeln!(out, "{json}");
        }
        Err(e) => {
            let _ = writeln!(out, "{}", format!("Cannot display section: {e}").red());
        }
    }
}

fn format_health(out: &mut String, display: &HealthDisplay) {
    match display {
        HealthDisplay::Loading => {
            let _ = writeln!(out, "Checking services...");
        }
        HealthDisplay::Failed { message } => {
            let _ = writeln!(
                out,
                "{}",
                format!("Health check failed: {message}. Run again to retry.").red()
            );
        }
        HealthDisplay::NotConfigured { message } => {
            let _ = writeln!(out, "{}", message.yellow());
        }
        HealthDisplay::Panels {
            embedder,
            vector_db,
        } => {
            format_panel(out, embedder);
            format_panel(out, vector_db);
        }
    }
}

fn format_panel(out: &mut String, panel: &SubsystemPanel) {
    let indicator = if panel.is_healthy() {
        "● Healthy".green()
    } else {
        "● Unhealthy".red()
    };
    let _ = writeln!(out, "{}  {}", panel.name.bold(), indicator);
    for (label, value) in &panel.fields {
        let _ = writeln!(out, "  {label:<14} {value}");
    }
    if let Some(error) = &panel.error {
        let _ = writeln!(out, "  {}", error.red());
    }
}
