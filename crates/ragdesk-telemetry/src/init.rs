use tokio::sync::mpsc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::notice_layer::{NoticeLayer, NoticeReceiver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Filter used when `RUST_LOG` is not set, e.g. `info` or `ragdesk_application=debug`
    pub level: String,
    pub ansi: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            ansi: true,
        }
    }
}

/// Installs the global subscriber: env filter, a stderr fmt layer and a
/// [`NoticeLayer`].
///
/// Returns the receiving end of the notice channel, or `None` when a global
/// subscriber was already installed.
pub fn init_tracing(settings: &LogSettings) -> Option<NoticeReceiver> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let (sender, receiver) = mpsc::unbounded_channel();

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(settings.ansi)
                .with_target(false),
        )
        .with(NoticeLayer::new(sender))
        .try_init();

    match installed {
        Ok(()) => Some(receiver),
        Err(e) => {
            tracing::debug!("Tracing already initialised: {}", e);
            None
        }
    }
}
