//! Aggregated health of the embedder and the vector store.

use std::sync::Arc;

use ragdesk_core::api::ConfigApi;
use ragdesk_core::health::{EmbedderHealth, HealthStatus, VectorDbHealth};
use ragdesk_core::Result;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::generation::{FetchOutcome, Generation, Ticket};

/// Lifecycle of the held health status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthState {
    /// Nothing fetched yet.
    Idle,
    Loading,
    Ready(HealthStatus),
    /// The last fetch failed; health is unknown.
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Healthy,
    Unhealthy,
}

/// Display of one subsystem, independent of the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsystemPanel {
    pub name: &'static str,
    pub indicator: Indicator,
    /// Label/value pairs shown when the subsystem reported details
    pub fields: Vec<(String, String)>,
    pub error: Option<String>,
}

impl SubsystemPanel {
    fn embedder(health: &EmbedderHealth) -> Self {
        let fields = health
            .info
            .as_ref()
            .map(|info| {
                vec![
                    ("Provider".to_string(), info.provider.clone()),
                    ("Model".to_string(), info.model_name.clone()),
                    ("Dimension".to_string(), info.dimension.to_string()),
                ]
            })
            .unwrap_or_default();

        Self {
            name: "Embedder",
            indicator: indicator(health.healthy),
            fields,
            error: health.error.clone(),
        }
    }

    fn vector_db(health: &VectorDbHealth) -> Self {
        let mut fields = Vec::new();
        if let Some(stats) = &health.stats {
            fields.push(("Total Vectors".to_string(), stats.total_vectors.to_string()));
            if let Some(collection) = &stats.collection_name {
                fields.push(("Collection".to_string(), collection.clone()));
            }
        }

        Self {
            name: "Vector Database",
            indicator: indicator(health.healthy),
            fields,
            error: health.error.clone(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.indicator == Indicator::Healthy
    }
}

fn indicator(healthy: bool) -> Indicator {
    if healthy {
        Indicator::Healthy
    } else {
        Indicator::Unhealthy
    }
}

/// What the health page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthDisplay {
    Loading,
    /// The health check itself failed; offer a retry.
    Failed { message: String },
    /// The backend has no configuration to check.
    NotConfigured { message: String },
    Panels {
        embedder: SubsystemPanel,
        vector_db: SubsystemPanel,
    },
}

/// Fetches and holds the combined health status.
///
/// Every [`fetch_health`](HealthAggregator::fetch_health) call supersedes the
/// previous one: only the response of the latest call is applied, and nothing
/// is applied after [`unmount`](HealthAggregator::unmount).
pub struct HealthAggregator {
    api: Arc<dyn ConfigApi>,
    state: RwLock<HealthState>,
    generation: Generation,
}

impl HealthAggregator {
    pub fn new(api: Arc<dyn ConfigApi>) -> Self {
        Self {
            api,
            state: RwLock::new(HealthState::Idle),
            generation: Generation::new(),
        }
    }

    pub async fn fetch_health(&self) -> FetchOutcome {
        let ticket = self.begin_fetch().await;
        let result = self.api.check_service_health().await;
        self.apply(ticket, result).await
    }

    /// Marks the state as loading and runs the health check on a runtime task.
    pub async fn spawn_fetch(self: &Arc<Self>) -> JoinHandle<FetchOutcome> {
        let ticket = self.begin_fetch().await;
        let aggregator = Arc::clone(self);
        tokio::spawn(async move {
            let result = aggregator.api.check_service_health().await;
            aggregator.apply(ticket, result).await
        })
    }

    async fn begin_fetch(&self) -> Ticket {
        let mut state = self.state.write().await;
        *state = HealthState::Loading;
        self.generation.begin()
    }

    async fn apply(&self, ticket: Ticket, result: Result<HealthStatus>) -> FetchOutcome {
        let mut state = self.state.write().await;
        if !self.generation.is_current(ticket) {
            tracing::debug!("Discarding stale health response");
            return FetchOutcome::Discarded;
        }

        *state = match result {
            Ok(status) => {
                tracing::info!(
                    embedder_healthy = status.embedder.healthy,
                    vector_db_healthy = status.vector_db.healthy,
                    "Service health refreshed"
                );
                HealthState::Ready(status)
            }
            Err(e) => {
                tracing::warn!("Health check failed: {}", e);
                HealthState::Unavailable(e.to_string())
            }
        };
        FetchOutcome::Applied
    }

    /// Drops any in-flight response.
    pub fn unmount(&self) {
        self.generation.invalidate();
    }

    pub async fn state(&self) -> HealthState {
        self.state.read().await.clone()
    }

    pub async fn display(&self) -> HealthDisplay {
        match &*self.state.read().await {
            HealthState::Idle | HealthState::Loading => HealthDisplay::Loading,
            HealthState::Unavailable(message) => HealthDisplay::Failed {
                message: message.clone(),
            },
            HealthState::Ready(status) if !status.configured => HealthDisplay::NotConfigured {
                message: status
                    .message
                    .clone()
                    .unwrap_or_else(|| "No configuration found".to_string()),
            },
            HealthState::Ready(status) => HealthDisplay::Panels {
                embedder: SubsystemPanel::embedder(&status.embedder),
                vector_db: SubsystemPanel::vector_db(&status.vector_db),
            },
        }
    }
}
