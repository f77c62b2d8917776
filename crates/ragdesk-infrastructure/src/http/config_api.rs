use async_trait::async_trait;
use ragdesk_core::Result;
use ragdesk_core::api::ConfigApi;
use ragdesk_core::config::{AppConfig, CurrentConfig, EmbedderConfig, UpdateAck, VectorDbConfig};
use ragdesk_core::health::HealthStatus;

use super::client::ApiClient;

/// `/config` endpoints of the backend.
#[derive(Clone)]
pub struct HttpConfigApi {
    client: ApiClient,
}

impl HttpConfigApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ConfigApi for HttpConfigApi {
    async fn get_current_config(&self) -> Result<CurrentConfig> {
        self.client.get("/config/").await
    }

    async fn check_service_health(&self) -> Result<HealthStatus> {
        self.client.get("/config/health").await
    }

    async fn update_embedder_config(&self, config: &EmbedderConfig) -> Result<UpdateAck> {
        tracing::info!(
            model = config.model_name().unwrap_or("unset"),
            "Updating embedder configuration"
        );
        self.client.post_json("/config/embedder", config).await
    }

    async fn update_vector_db_config(&self, config: &VectorDbConfig) -> Result<UpdateAck> {
        tracing::info!(
            collection = config.collection_name().unwrap_or("unset"),
            "Updating vector database configuration"
        );
        self.client.post_json("/config/vector-db", config).await
    }

    async fn update_complete_config(&self, config: &AppConfig) -> Result<UpdateAck> {
        tracing::info!(
            has_embedder = config.embedder.is_some(),
            has_vector_db = config.vector_db.is_some(),
            "Replacing backend configuration"
        );
        self.client.post_json("/config/complete", config).await
    }

    async fn reset_config(&self) -> Result<UpdateAck> {
        tracing::info!("Resetting backend configuration");
        self.client.delete("/config/reset").await
    }
}
