//! Tracing layer turning warnings and errors into [`ShellNotice`]s.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

pub type NoticeReceiver = mpsc::UnboundedReceiver<ShellNotice>;

/// A warning or error surfaced to the user outside the log.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ShellNotice {
    /// WARN or ERROR
    pub level: String,
    /// Module path of the event, e.g. `ragdesk_application::health`
    pub target: String,
    pub message: String,
    pub fields: HashMap<String, Value>,
    pub timestamp: String,
}

impl ShellNotice {
    pub fn is_error(&self) -> bool {
        self.level == Level::ERROR.as_str()
    }
}

/// Sends every WARN and ERROR event to a channel.
pub struct NoticeLayer {
    sender: mpsc::UnboundedSender<ShellNotice>,
}

impl NoticeLayer {
    pub fn new(sender: mpsc::UnboundedSender<ShellNotice>) -> Self {
        Self { sender }
    }

    pub fn channel() -> (Self, NoticeReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl<S> Layer<S> for NoticeLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        if level > Level::WARN {
            return;
        }

        let mut fields = HashMap::new();
        event.record(&mut FieldVisitor(&mut fields));
        let message = match fields.remove("message") {
            Some(Value::String(message)) => message,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let notice = ShellNotice {
            level: level.to_string(),
            target: event.metadata().target().to_string(),
            message,
            fields,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // Receiver gone means nobody shows notices any more
        let _ = self.sender.send(notice);
    }
}

struct FieldVisitor<'a>(&'a mut HashMap<String, Value>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(format!("{:?}", value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_only_warnings_and_errors_become_notices() {
        let (layer, mut receiver) = NoticeLayer::channel();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Loaded 3 documents");
            tracing::warn!(status = 503u64, "Health check failed: {}", "service unavailable");
            tracing::error!(route = "/chat", "Page panicked");
        });

        let warning = receiver.try_recv().unwrap();
        assert_eq!(warning.level, "WARN");
        assert_eq!(warning.message, "Health check failed: service unavailable");
        assert_eq!(warning.fields.get("status"), Some(&serde_json::json!(503)));
        assert!(!warning.is_error());

        let error = receiver.try_recv().unwrap();
        assert!(error.is_error());
        assert_eq!(error.fields.get("route"), Some(&serde_json::json!("/chat")));

        assert!(receiver.try_recv().is_err());
    }
}
