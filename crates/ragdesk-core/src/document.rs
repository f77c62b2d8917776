//! Document models shared by the upload and document list views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the indexed document list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub document_id: String,
    pub filename: String,
    #[serde(default)]
    pub chunk_count: u32,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Returned by the backend once an upload has been processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUploadResponse {
    pub document_id: String,
    pub filename: String,
    #[serde(default)]
    pub chunks_created: u32,
    #[serde(default)]
    pub message: Option<String>,
}
