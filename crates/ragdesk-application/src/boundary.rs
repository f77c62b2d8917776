//! Error boundary isolating one page's failure from the rest of the shell.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use ragdesk_core::route::Route;
use ragdesk_core::{RagdeskError, Result};
use tokio::task::JoinHandle;

use crate::screen::Screen;

/// Runs page work so that an error or a panic becomes a
/// [`RagdeskError::Render`] instead of tearing down the shell.
pub struct ErrorBoundary;

impl ErrorBoundary {
    /// Awaits `work`, catching panics and reporting failures.
    ///
    /// `stage` names what the page was doing ("mount", "render", ...) and only
    /// appears in the log.
    pub async fn run<T, F>(route: Route, stage: &'static str, work: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        Self::contain(route, stage, work).await.map_err(|e| {
            if e.is_render() {
                return e;
            }
            tracing::error!(route = %route, stage, "Page failed: {}", e);
            RagdeskError::render(route.path(), e.to_string())
        })
    }

    /// Like [`run`](Self::run), but only panics become render errors; ordinary
    /// errors are returned unchanged.
    pub async fn contain<T, F>(route: Route, stage: &'static str, work: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match AssertUnwindSafe(work).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(route = %route, stage, "Page panicked: {}", message);
                Err(RagdeskError::render(route.path(), message))
            }
        }
    }

    /// Awaits a page task started on the runtime; a panic inside the task
    /// becomes a render error.
    pub async fn join<T>(route: Route, stage: &'static str, task: JoinHandle<T>) -> Result<T> {
        match task.await {
            Ok(value) => Ok(value),
            Err(e) if e.is_panic() => {
                let message = panic_message(e.into_panic().as_ref());
                tracing::error!(route = %route, stage, "Page task panicked: {}", message);
                Err(RagdeskError::render(route.path(), message))
            }
            Err(e) => Err(RagdeskError::internal(format!("{route} task stopped: {e}"))),
        }
    }

    /// Renders a page, substituting a failure screen if rendering fails.
    pub async fn render<F>(route: Route, work: F) -> Screen
    where
        F: Future<Output = Result<Screen>>,
    {
        match Self::run(route, "render", work).await {
            Ok(screen) => screen,
            Err(e) => Self::fallback(route, &e),
        }
    }

    pub fn fallback(route: Route, error: &RagdeskError) -> Screen {
        let message = match error {
            RagdeskError::Render { message, .. } => message.clone(),
            other => other.to_string(),
        };
        Screen::failed(route, message)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "page panicked".to_string()
    }
}
