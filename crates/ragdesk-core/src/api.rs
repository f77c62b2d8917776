//! Backend collaborator traits.
//!
//! The application layer depends only on these traits; the HTTP bindings
//! live in `ragdesk-infrastructure`.

use async_trait::async_trait;

use crate::config::{AppConfig, CurrentConfig, EmbedderConfig, UpdateAck, VectorDbConfig};
use crate::document::{DocumentSummary, DocumentUploadResponse};
use crate::error::Result;
use crate::health::HealthStatus;

/// Configuration and health endpoints of the backend.
#[async_trait]
pub trait ConfigApi: Send + Sync {
    /// Fetches the current system configuration.
    async fn get_current_config(&self) -> Result<CurrentConfig>;

    /// Runs the combined embedder + vector store health check.
    async fn check_service_health(&self) -> Result<HealthStatus>;

    async fn update_embedder_config(&self, config: &EmbedderConfig) -> Result<UpdateAck>;

    async fn update_vector_db_config(&self, config: &VectorDbConfig) -> Result<UpdateAck>;

    /// Replaces the whole configuration; the backend re-initialises both
    /// services before saving it.
    async fn update_complete_config(&self, config: &AppConfig) -> Result<UpdateAck>;

    /// Restores the backend's default configuration.
    async fn reset_config(&self) -> Result<UpdateAck>;
}

/// Document endpoints of the backend.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn list_documents(&self) -> Result<Vec<DocumentSummary>>;

    async fn upload_document(
        &self,
        filename: &str,
        content: Vec<u8>,
    ) -> Result<DocumentUploadResponse>;
}
