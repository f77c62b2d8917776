//! Client-side route table.
//!
//! Routes are a closed set: any path that does not parse into a [`Route`]
//! is rejected with [`RagdeskError::UnknownRoute`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::error::RagdeskError;

/// Every view the shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Login,
    Signup,
    AuthCallback,
    Upload,
    Chat,
    Search,
    Documents,
    Config,
    Health,
}

impl Route {
    /// The client path of this route.
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::AuthCallback => "/auth/callback",
            Route::Upload => "/",
            Route::Chat => "/chat",
            Route::Search => "/search",
            Route::Documents => "/documents",
            Route::Config => "/config",
            Route::Health => "/health",
        }
    }

    /// Human-readable title used in navigation.
    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Signup => "Sign Up",
            Route::AuthCallback => "Signing In",
            Route::Upload => "Upload",
            Route::Chat => "Chat",
            Route::Search => "Search",
            Route::Documents => "Documents",
            Route::Config => "Configuration",
            Route::Health => "System Health",
        }
    }

    /// Whether the route requires an authenticated session.
    pub fn is_protected(self) -> bool {
        !matches!(self, Route::Login | Route::Signup | Route::AuthCallback)
    }

    /// Routes listed in the sidebar, in display order.
    pub fn navigation() -> impl Iterator<Item = Route> {
        Route::iter().filter(|r| r.is_protected())
    }

    /// Parses a client path.
    ///
    /// Query strings, fragments and trailing slashes are ignored, so
    /// `/auth/callback?code=abc` and `/health/` both resolve.
    pub fn from_path(path: &str) -> Result<Route, RagdeskError> {
        let without_query = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let trimmed = without_query.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        Route::iter()
            .find(|r| r.path() == normalized)
            .ok_or_else(|| RagdeskError::UnknownRoute(path.to_string()))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = RagdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::from_path(s)
    }
}
