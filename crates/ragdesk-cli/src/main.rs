use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ragdesk_application::{AppShell, ConfigTab};
use ragdesk_core::session::UserInfo;
use ragdesk_infrastructure::{
    ApiClient, ClientSettings, HttpConfigApi, HttpDocumentApi, SessionStore,
};
use ragdesk_telemetry::{LogSettings, init_tracing};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "ragdesk")]
#[command(about = "Ragdesk - terminal client for the document RAG platform", long_about = None)]
struct Cli {
    /// Backend base URL (overrides client.toml and RAGDESK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Sign in as this user before running the command
    #[arg(long, global = true, env = "RAGDESK_USER")]
    user: Option<String>,

    /// Access token sent as a bearer token
    #[arg(long, global = true, env = "RAGDESK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the client routes
    Routes,
    /// Navigate to a path and print the screen
    Open {
        /// Path such as /documents or /config
        path: String,
    },
    /// Show the health of the embedder and the vector database
    Health,
    /// Show the configuration page
    Config {
        /// Tab to select: embedder, vectordb, chat or prompts
        #[arg(long, default_value_t = ConfigTab::Embedder)]
        tab: ConfigTab,
    },
    /// List indexed documents
    Documents,
    /// Upload a document, then show the refreshed document list
    Upload {
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = ClientSettings::load()
        .context("Failed to load client settings")?
        .with_api_url_override(cli.api_url.clone())
        .context("Invalid --api-url")?;
    let notices = init_tracing(&LogSettings {
        level: cli.log_level.clone().unwrap_or_else(|| settings.log_level.clone()),
        ..Default::default()
    });

    let store = Arc::new(SessionStore::new());
    if let Some(username) = &cli.user {
        let user = UserInfo {
            user_id: username.clone(),
            username: username.clone(),
            ..Default::default()
        };
        store.sign_in(user, cli.token.clone()).await;
    }

    let client = ApiClient::new(&settings)
        .context("Failed to create HTTP client")?
        .with_session_store(store.clone());
    tracing::debug!("Using backend at {}", client.base_url());
    let shell = AppShell::new(
        store,
        Arc::new(HttpConfigApi::new(client.clone())),
        Arc::new(HttpDocumentApi::new(client)),
    );

    let result = match cli.command {
        Commands::Routes => {
            commands::routes::list();
            Ok(())
        }
        Commands::Open { path } => commands::open::path(&shell, &path).await,
        Commands::Health => commands::open::path(&shell, "/health").await,
        Commands::Config { tab } => commands::open::config(&shell, tab).await,
        Commands::Documents => commands::open::path(&shell, "/documents").await,
        Commands::Upload { file } => commands::upload::run(&shell, &file).await,
    };

    if let Some(mut notices) = notices {
        output::print_notices(&mut notices);
    }
    result
}
