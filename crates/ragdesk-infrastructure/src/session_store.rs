//! In-memory session store.
//!
//! Holds the session the identity provider handed over after sign-in,
//! together with the access token attached to backend requests.

use async_trait::async_trait;
use ragdesk_core::session::{AuthProvider, Session, UserInfo};
use ragdesk_core::{RagdeskError, Result};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct StoredSession {
    session: Session,
    access_token: Option<String>,
}

/// [`AuthProvider`] backed by process memory.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<StoredSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed sign-in.
    pub async fn sign_in(&self, user: UserInfo, access_token: Option<String>) {
        tracing::info!(username = %user.username, "Signed in");
        let mut inner = self.inner.write().await;
        inner.session = Session::authenticated(user);
        inner.access_token = access_token.filter(|t| !t.is_empty());
    }

    pub async fn access_token(&self) -> Option<String> {
        self.inner.read().await.access_token.clone()
    }
}

#[async_trait]
impl AuthProvider for SessionStore {
    async fn session(&self) -> Session {
        self.inner.read().await.session.clone()
    }

    async fn logout(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        if !inner.session.is_authenticated {
            return Err(RagdeskError::auth("no active session to log out of"));
        }
        *inner = StoredSession::default();
        Ok(())
    }
}
