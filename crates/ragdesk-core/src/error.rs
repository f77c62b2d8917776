//! Error types for the Ragdesk client shell.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Ragdesk client.
///
/// Variants are grouped by how the shell recovers from them: fetch failures
/// (`Network`, `Server`, `Serialization`) degrade a single panel, `Auth` leaves
/// the session untouched, and `Render` is produced by the error boundary when
/// a page fails.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RagdeskError {
    /// The backend could not be reached (connection refused, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Authentication provider error (login, logout, token refresh)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A page failed while mounting or rendering
    #[error("Render error on {route}: {message}")]
    Render { route: String, message: String },

    /// A path that does not name any view
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RagdeskError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Server error
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates a Render error for the given route path
    pub fn render(route: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            route: route.into(),
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error came from talking to the backend.
    ///
    /// Covers transport failures, non-success responses and undecodable
    /// response bodies. These are the errors a panel recovers from by showing
    /// a failed state.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Server { .. } | Self::Serialization { .. }
        )
    }

    /// Check if this is an Auth error
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Check if this is a Render error
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RagdeskError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RagdeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RagdeskError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for RagdeskError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, RagdeskError>`.
pub type Result<T> = std::result::Result<T, RagdeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failure_classification() {
        assert!(RagdeskError::network("connection refused").is_fetch_failure());
        assert!(RagdeskError::server(500, "boom").is_fetch_failure());
        assert!(!RagdeskError::auth("expired").is_fetch_failure());
        assert!(!RagdeskError::render("/chat", "panic").is_fetch_failure());
    }

    #[test]
    fn test_server_error_display() {
        let err = RagdeskError::server(503, "Keycloak not configured");
        assert_eq!(
            err.to_string(),
            "Server error (503): Keycloak not configured"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let err: RagdeskError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        match err {
            RagdeskError::Serialization { format, .. } => assert_eq!(format, "JSON"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
