use std::sync::Arc;

use async_trait::async_trait;
use ragdesk_core::api::DocumentApi;
use ragdesk_core::document::DocumentUploadResponse;
use ragdesk_core::route::Route;
use ragdesk_core::{RagdeskError, Result};
use tokio::sync::RwLock;

use super::{Page, PageAction};
use crate::refresh_bus::RefreshBus;
use crate::screen::{Screen, ScreenBody};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadView {
    pub last_upload: Option<DocumentUploadResponse>,
    pub error: Option<String>,
    /// Refresh token after the last completed upload
    pub refresh_token: u64,
}

/// Upload view. Every completed upload bumps the shared refresh bus.
pub struct UploadPage {
    api: Arc<dyn DocumentApi>,
    refresh_bus: RefreshBus,
    view: RwLock<UploadView>,
}

impl UploadPage {
    pub fn new(api: Arc<dyn DocumentApi>, refresh_bus: RefreshBus) -> Self {
        let view = UploadView {
            refresh_token: refresh_bus.current(),
            ..Default::default()
        };
        Self {
            api,
            refresh_bus,
            view: RwLock::new(view),
        }
    }

    pub async fn upload(
        &self,
        filename: &str,
        content: Vec<u8>,
    ) -> Result<DocumentUploadResponse> {
        if content.is_empty() {
            return Err(RagdeskError::config(format!("{filename} is empty")));
        }

        match self.api.upload_document(filename, content).await {
            Ok(response) => {
                let token = self.refresh_bus.bump();
                tracing::info!(
                    document_id = %response.document_id,
                    chunks = response.chunks_created,
                    "Upload of {} completed",
                    filename
                );
                let mut view = self.view.write().await;
                view.last_upload = Some(response.clone());
                view.error = None;
                view.refresh_token = token;
                Ok(response)
            }
            Err(e) => {
                tracing::warn!("Upload of {} failed: {}", filename, e);
                self.view.write().await.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn view(&self) -> UploadView {
        self.view.read().await.clone()
    }
}

#[async_trait]
impl Page for UploadPage {
    fn route(&self) -> Route {
        Route::Upload
    }

    async fn render(&self) -> Result<Screen> {
        Ok(Screen::new(
            Route::Upload.title(),
            ScreenBody::Upload(self.view().await),
        ))
    }

    async fn handle(&self, action: PageAction) -> Result<()> {
        match action {
            PageAction::Upload { filename, content } => {
                self.upload(&filename, content).await.map(|_| ())
            }
            PageAction::Refresh => Ok(()),
            other => Err(RagdeskError::internal(format!(
                "upload page does not handle '{}'",
                other.name()
            ))),
        }
    }
}
