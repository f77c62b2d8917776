//! Service health models, as served by `GET /config/health`.

use serde::{Deserialize, Serialize};

/// Model details reported by a healthy embedder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedderInfo {
    pub provider: String,
    pub model_name: String,
    pub dimension: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EmbedderHealth {
    #[serde(default)]
    pub healthy: bool,
    #[serde(default)]
    pub info: Option<EmbedderInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Collection statistics reported by a healthy vector store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VectorDbStats {
    #[serde(default)]
    pub total_vectors: u64,
    #[serde(default)]
    pub collection_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VectorDbHealth {
    #[serde(default)]
    pub healthy: bool,
    #[serde(default)]
    pub stats: Option<VectorDbStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Combined health of the two backend subsystems.
///
/// Always replaced as a whole; the two subsystems are never updated
/// separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// False when the backend has no configuration yet
    #[serde(default = "default_configured")]
    pub configured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub embedder: EmbedderHealth,
    #[serde(default)]
    pub vector_db: VectorDbHealth,
}

fn default_configured() -> bool {
    true
}

impl HealthStatus {
    /// Whether both subsystems report healthy.
    pub fn all_healthy(&self) -> bool {
        self.configured && self.embedder.healthy && self.vector_db.healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mixed_health() {
        let json = r#"{
            "configured": true,
            "embedder": {"healthy": true, "info": {"provider": "openai", "model_name": "text-embedding-3", "dimension": 1536}},
            "vector_db": {"healthy": false, "stats": null, "error": "connection refused"}
        }"#;
        let status: HealthStatus = serde_json::from_str(json).unwrap();

        assert!(status.embedder.healthy);
        assert_eq!(status.embedder.info.as_ref().unwrap().dimension, 1536);
        assert!(!status.vector_db.healthy);
        assert_eq!(status.vector_db.error.as_deref(), Some("connection refused"));
        assert!(!status.all_healthy());
    }

    #[test]
    fn test_deserialize_unconfigured_backend() {
        let json = r#"{"configured": false, "message": "No configuration found"}"#;
        let status: HealthStatus = serde_json::from_str(json).unwrap();

        assert!(!status.configured);
        assert!(!status.embedder.healthy);
        assert!(!status.vector_db.healthy);
    }
}
