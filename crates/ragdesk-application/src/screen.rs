//! Typed output of a rendered page.
//!
//! Screens describe what to show, not how; the front end decides the drawing.

use ragdesk_core::route::Route;

use crate::health::HealthDisplay;
use crate::pages::{ConfigView, DocumentsView, UploadView};

#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub title: String,
    pub body: ScreenBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenBody {
    /// A view whose widgets live outside the shell.
    Placeholder { description: String },
    Upload(UploadView),
    Documents(DocumentsView),
    Config(ConfigView),
    Health(HealthDisplay),
    /// The requested path names no view.
    NotFound { path: String },
    /// The page failed; the rest of the shell is unaffected.
    Failed { message: String },
}

impl Screen {
    pub fn new(title: impl Into<String>, body: ScreenBody) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }

    pub fn placeholder(route: Route, description: impl Into<String>) -> Self {
        Self::new(
            route.title(),
            ScreenBody::Placeholder {
                description: description.into(),
            },
        )
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        Self::new(
            "Page Not Found",
            ScreenBody::NotFound { path: path.into() },
        )
    }

    pub fn failed(route: Route, message: impl Into<String>) -> Self {
        Self::new(
            route.title(),
            ScreenBody::Failed {
                message: message.into(),
            },
        )
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.body, ScreenBody::Failed { .. })
    }
}
