use serde::{Deserialize, Serialize};

/// Information about the signed-in user, as returned by `/api/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserInfo {
    pub user_id: String,
    pub email: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl UserInfo {
    /// Name shown in the sidebar.
    ///
    /// Prefers the full `name` claim, then `given_name family_name`, then the
    /// username.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }

        let parts: Vec<&str> = [self.given_name.as_deref(), self.family_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.trim().is_empty())
            .collect();
        if !parts.is_empty() {
            return parts.join(" ");
        }

        self.username.clone()
    }
}

/// A snapshot of the authentication state.
///
/// Snapshots are taken by the shell once per navigation and passed explicitly
/// to whatever needs them (route gate, sidebar).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub is_authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
}

impl Session {
    /// An unauthenticated session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An authenticated session for the given user.
    pub fn authenticated(user: UserInfo) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
        }
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }
}
