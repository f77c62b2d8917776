//! Authentication provider trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::model::Session;

/// The authentication collaborator the shell reads sessions from.
///
/// Protocol details (OIDC redirects, token refresh) live behind this trait.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Returns the current session snapshot.
    async fn session(&self) -> Session;

    /// Ends the current session.
    ///
    /// Fails with [`RagdeskError::Auth`](crate::RagdeskError::Auth) when the
    /// provider could not log out; the session must then be left unchanged.
    async fn logout(&self) -> Result<()>;
}
