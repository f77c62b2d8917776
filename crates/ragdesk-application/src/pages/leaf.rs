use async_trait::async_trait;
use ragdesk_core::route::Route;
use ragdesk_core::{RagdeskError, Result};

use super::{Page, PageAction};
use crate::screen::Screen;

/// A page whose content is drawn by an external widget.
///
/// The shell only positions it; refreshing is a no-op.
pub struct LeafPage {
    route: Route,
}

impl LeafPage {
    pub fn new(route: Route) -> Self {
        Self { route }
    }

    fn description(&self) -> &'static str {
        match self.route {
            Route::Login => "Sign in with your organisation account.",
            Route::Signup => "Create an account to start indexing documents.",
            Route::AuthCallback => "Completing sign-in, please wait.",
            Route::Chat => "Ask questions answered from your indexed documents.",
            Route::Search => "Run semantic search over indexed chunks.",
            Route::Upload | Route::Documents | Route::Config | Route::Health => "",
        }
    }
}

#[async_trait]
impl Page for LeafPage {
    fn route(&self) -> Route {
        self.route
    }

    async fn render(&self) -> Result<Screen> {
        Ok(Screen::placeholder(self.route, self.description()))
    }

    async fn handle(&self, action: PageAction) -> Result<()> {
        match action {
            PageAction::Refresh => Ok(()),
            other => Err(RagdeskError::internal(format!(
                "{} does not handle '{}'",
                self.route,
                other.name()
            ))),
        }
    }
}
