use async_trait::async_trait;
use ragdesk_core::api::DocumentApi;
use ragdesk_core::document::{DocumentSummary, DocumentUploadResponse};
use ragdesk_core::{RagdeskError, Result};
use reqwest::multipart::{Form, Part};

use super::client::ApiClient;

/// `/documents` endpoints of the backend.
#[derive(Clone)]
pub struct HttpDocumentApi {
    client: ApiClient,
}

impl HttpDocumentApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentApi for HttpDocumentApi {
    async fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
        self.client.get("/documents/").await
    }

    async fn upload_document(
        &self,
        filename: &str,
        content: Vec<u8>,
    ) -> Result<DocumentUploadResponse> {
        let size = content.len();
        let part = Part::bytes(content)
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| RagdeskError::internal(format!("invalid upload part: {e}")))?;
        let form = Form::new().part("file", part);

        tracing::info!(bytes = size, "Uploading {}", filename);
        self.client.post_multipart("/documents/upload", form).await
    }
}
