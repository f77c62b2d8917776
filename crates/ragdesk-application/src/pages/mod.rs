//! Page view-models mounted by the shell.
//!
//! # Module Structure
//!
//! - `leaf`: Views whose widgets live outside the shell (login, signup, auth callback, chat, search)
//! - `upload`: Upload view, bumps the refresh bus on completion
//! - `documents`: Document list, re-fetches when the refresh token changes
//! - `config`: Configuration page owning a [`ConfigTabController`](crate::ConfigTabController)
//! - `health`: Health page owning a [`HealthAggregator`](crate::HealthAggregator)

mod config;
mod documents;
mod health;
mod leaf;
mod upload;

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use ragdesk_core::config::{ChatSettings, EmbedderConfig, PromptSettings, VectorDbConfig};
use ragdesk_core::route::Route;
use ragdesk_core::{RagdeskError, Result};
use tokio::task::JoinHandle;

use crate::boundary::ErrorBoundary;
use crate::config_tab::ConfigTab;
use crate::generation::FetchOutcome;
use crate::screen::Screen;

pub use config::{ConfigPage, ConfigView};
pub use documents::{DocumentsPage, DocumentsView, ListState};
pub use health::HealthPage;
pub use leaf::LeafPage;
pub use upload::{UploadPage, UploadView};

/// User intents dispatched to the mounted page.
#[derive(Debug, Clone)]
pub enum PageAction {
    /// Explicit refresh (retry button, pull-to-refresh).
    Refresh,
    SelectTab(ConfigTab),
    SubmitEmbedder(EmbedderConfig),
    SubmitVectorDb(VectorDbConfig),
    /// Save embedder and vector database together.
    SubmitComplete {
        embedder: EmbedderConfig,
        vector_db: VectorDbConfig,
    },
    ApplyChat(ChatSettings),
    ApplyPrompts(PromptSettings),
    ResetConfig,
    Upload { filename: String, content: Vec<u8> },
}

impl PageAction {
    pub fn name(&self) -> &'static str {
        match self {
            PageAction::Refresh => "refresh",
            PageAction::SelectTab(_) => "select-tab",
            PageAction::SubmitEmbedder(_) => "submit-embedder",
            PageAction::SubmitVectorDb(_) => "submit-vector-db",
            PageAction::SubmitComplete { .. } => "submit-complete",
            PageAction::ApplyChat(_) => "apply-chat",
            PageAction::ApplyPrompts(_) => "apply-prompts",
            PageAction::ResetConfig => "reset-config",
            PageAction::Upload { .. } => "upload",
        }
    }
}

/// A view the shell can mount, render and unmount.
///
/// Pages are built fresh for every mount, so state such as the active
/// configuration tab does not survive navigating away.
#[async_trait]
pub trait Page: Send + Sync {
    fn route(&self) -> Route;

    /// Starts the page's initial fetches.
    ///
    /// Slow fetches run on a runtime task so the first render shows their
    /// loading state.
    async fn mount(&self) -> Result<()> {
        Ok(())
    }

    /// Waits for fetches started by `mount` or `handle` to finish.
    async fn settle(&self) -> Result<()> {
        Ok(())
    }

    async fn render(&self) -> Result<Screen>;

    async fn handle(&self, action: PageAction) -> Result<()> {
        Err(RagdeskError::internal(format!(
            "{} does not handle '{}'",
            self.route(),
            action.name()
        )))
    }

    /// Called when the shell navigates away; in-flight results must be dropped.
    fn unmount(&self) {}
}

/// The latest fetch a page started on a runtime task.
#[derive(Default)]
pub(crate) struct BackgroundFetch {
    task: Mutex<Option<JoinHandle<FetchOutcome>>>,
}

impl BackgroundFetch {
    /// Tracks `task`, detaching any earlier one; its result is already stale.
    pub(crate) fn track(&self, task: JoinHandle<FetchOutcome>) {
        self.slot().replace(task);
    }

    pub(crate) async fn settle(&self, route: Route) -> Result<()> {
        let task = self.slot().take();
        match task {
            Some(task) => ErrorBoundary::join(route, "fetch", task).await.map(|_| ()),
            None => Ok(()),
        }
    }

    /// Reports a panic from a finished task without waiting on a running one.
    pub(crate) async fn check(&self, route: Route) -> Result<()> {
        let finished = {
            let mut slot = self.slot();
            if slot.as_ref().is_some_and(JoinHandle::is_finished) {
                slot.take()
            } else {
                None
            }
        };
        match finished {
            Some(task) => ErrorBoundary::join(route, "fetch", task).await.map(|_| ()),
            None => Ok(()),
        }
    }

    pub(crate) fn abort(&self) {
        if let Some(task) = self.slot().take() {
            task.abort();
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<FetchOutcome>>> {
        self.task.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
