use std::sync::Arc;

use async_trait::async_trait;
use ragdesk_core::api::DocumentApi;
use ragdesk_core::document::DocumentSummary;
use ragdesk_core::route::Route;
use ragdesk_core::{RagdeskError, Result};
use tokio::sync::{Mutex, RwLock};

use super::{Page, PageAction};
use crate::generation::{FetchOutcome, Generation};
use crate::refresh_bus::RefreshListener;
use crate::screen::{Screen, ScreenBody};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Loaded(Vec<DocumentSummary>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentsView {
    /// Refresh token the list was fetched for
    pub refresh_trigger: u64,
    pub list: ListState,
}

/// Document list. Re-fetches whenever the refresh token differs from the one
/// the held list was fetched for.
pub struct DocumentsPage {
    api: Arc<dyn DocumentApi>,
    refresh: RefreshListener,
    synced: Mutex<Option<u64>>,
    list: RwLock<ListState>,
    generation: Generation,
}

impl DocumentsPage {
    pub fn new(api: Arc<dyn DocumentApi>, refresh: RefreshListener) -> Self {
        Self {
            api,
            refresh,
            synced: Mutex::new(None),
            list: RwLock::new(ListState::Loading),
            generation: Generation::new(),
        }
    }

    /// Brings the list up to date with `trigger`.
    ///
    /// Fetches only when `trigger` differs from the last synced token.
    pub async fn sync(&self, trigger: u64) -> FetchOutcome {
        let mut synced = self.synced.lock().await;
        if *synced == Some(trigger) {
            return FetchOutcome::Skipped;
        }

        let ticket = self.generation.begin();
        *self.list.write().await = ListState::Loading;
        let result = self.api.list_documents().await;

        let mut list = self.list.write().await;
        if !self.generation.is_current(ticket) {
            tracing::debug!("Discarding document list fetched after unmount");
            return FetchOutcome::Discarded;
        }

        *list = match result {
            Ok(documents) => {
                tracing::info!(
                    refresh_token = trigger,
                    "Loaded {} documents",
                    documents.len()
                );
                ListState::Loaded(documents)
            }
            Err(e) => {
                tracing::warn!("Failed to load documents: {}", e);
                ListState::Failed(e.to_string())
            }
        };
        *synced = Some(trigger);
        FetchOutcome::Applied
    }

    pub async fn view(&self) -> DocumentsView {
        DocumentsView {
            refresh_trigger: self.synced.lock().await.unwrap_or_default(),
            list: self.list.read().await.clone(),
        }
    }
}

#[async_trait]
impl Page for DocumentsPage {
    fn route(&self) -> Route {
        Route::Documents
    }

    async fn mount(&self) -> Result<()> {
        self.sync(self.refresh.current()).await;
        Ok(())
    }

    async fn render(&self) -> Result<Screen> {
        self.sync(self.refresh.current()).await;
        Ok(Screen::new(
            Route::Documents.title(),
            ScreenBody::Documents(self.view().await),
        ))
    }

    async fn handle(&self, action: PageAction) -> Result<()> {
        match action {
            PageAction::Refresh => {
                *self.synced.lock().await = None;
                self.sync(self.refresh.current()).await;
                Ok(())
            }
            other => Err(RagdeskError::internal(format!(
                "documents page does not handle '{}'",
                other.name()
            ))),
        }
    }

    fn unmount(&self) {
        self.generation.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh_bus::RefreshBus;
    use ragdesk_core::document::DocumentUploadResponse;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingDocumentApi {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DocumentApi for CountingDocumentApi {
        async fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok((0..n)
                .map(|i| DocumentSummary {
                    document_id: format!("doc-{i}"),
                    filename: format!("file-{i}.pdf"),
                    chunk_count: 3,
                    uploaded_at: None,
                })
                .collect())
        }

        async fn upload_document(
            &self,
            _filename: &str,
            _content: Vec<u8>,
        ) -> Result<DocumentUploadResponse> {
            Err(RagdeskError::internal("not used"))
        }
    }

    #[tokio::test]
    async fn test_bump_while_mounted_triggers_refetch() {
        let bus = RefreshBus::new();
        for _ in 0..3 {
            bus.bump();
        }
        let api = Arc::new(CountingDocumentApi {
            calls: AtomicUsize::new(0),
        });
        let page = DocumentsPage::new(api.clone(), bus.subscribe());
        page.mount().await.unwrap();
        assert_eq!(page.view().await.refresh_trigger, 3);

        // Rendering with an unchanged token does not re-fetch
        page.render().await.unwrap();
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);

        bus.bump();
        let screen = page.render().await.unwrap();

        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
        let ScreenBody::Documents(view) = screen.body else {
            panic!("expected documents view");
        };
        assert_eq!(view.refresh_trigger, 4);
        assert!(matches!(view.list, ListState::Loaded(ref docs) if docs.len() == 2));
    }

    #[tokio::test]
    async fn test_explicit_refresh_refetches_same_token() {
        let bus = RefreshBus::new();
        let api = Arc::new(CountingDocumentApi {
            calls: AtomicUsize::new(0),
        });
        let page = DocumentsPage::new(api.clone(), bus.subscribe());
        page.mount().await.unwrap();

        page.handle(PageAction::Refresh).await.unwrap();
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }
}
