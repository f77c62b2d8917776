#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ragdesk_application::AppShell;
use ragdesk_core::api::{ConfigApi, DocumentApi};
use ragdesk_core::config::{
    AppConfig, CurrentConfig, EmbedderConfig, UpdateAck, VectorDbConfig,
};
use ragdesk_core::document::{DocumentSummary, DocumentUploadResponse};
use ragdesk_core::health::{
    EmbedderHealth, EmbedderInfo, HealthStatus, VectorDbHealth, VectorDbStats,
};
use ragdesk_core::session::{AuthProvider, Session, UserInfo};
use ragdesk_core::{RagdeskError, Result};
use tokio::sync::Notify;

/// Auth provider whose session can be switched by the test.
pub struct SwitchableAuth {
    session: Mutex<Session>,
    pub fail_logout: AtomicBool,
}

impl SwitchableAuth {
    pub fn new(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
            fail_logout: AtomicBool::new(false),
        }
    }

    pub fn set(&self, session: Session) {
        *self.session.lock().unwrap() = session;
    }
}

#[async_trait]
impl AuthProvider for SwitchableAuth {
    async fn session(&self) -> Session {
        self.session.lock().unwrap().clone()
    }

    async fn logout(&self) -> Result<()> {
        if self.fail_logout.load(Ordering::SeqCst) {
            return Err(RagdeskError::auth("identity provider unreachable"));
        }
        self.set(Session::anonymous());
        Ok(())
    }
}

/// In-memory backend serving configuration, health and documents.
#[derive(Default)]
pub struct StubBackend {
    pub documents: Mutex<Vec<DocumentSummary>>,
    pub list_calls: AtomicUsize,
    pub config: Mutex<Option<AppConfig>>,
    pub panic_on_health: AtomicBool,
}

impl StubBackend {
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

fn ack(message: &str) -> UpdateAck {
    UpdateAck {
        message: message.to_string(),
        embedder_info: None,
        stats: None,
    }
}

#[async_trait]
impl ConfigApi for StubBackend {
    async fn get_current_config(&self) -> Result<CurrentConfig> {
        let config = self.config.lock().unwrap().clone();
        Ok(CurrentConfig {
            configured: config.is_some(),
            config,
            message: None,
        })
    }

    async fn check_service_health(&self) -> Result<HealthStatus> {
        if self.panic_on_health.load(Ordering::SeqCst) {
            panic!("health widget exploded");
        }
        Ok(HealthStatus {
            configured: true,
            message: None,
            embedder: EmbedderHealth {
                healthy: true,
                info: Some(EmbedderInfo {
                    provider: "huggingface".to_string(),
                    model_name: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
                    dimension: 384,
                }),
                error: None,
            },
            vector_db: VectorDbHealth {
                healthy: true,
                stats: Some(VectorDbStats {
                    total_vectors: 42,
                    collection_name: Some("documents".to_string()),
                }),
                error: None,
            },
        })
    }

    async fn update_embedder_config(&self, config: &EmbedderConfig) -> Result<UpdateAck> {
        let mut stored = self.config.lock().unwrap();
        stored.get_or_insert_with(AppConfig::default).embedder = Some(config.clone());
        Ok(ack("Embedder configuration updated"))
    }

    async fn update_vector_db_config(&self, config: &VectorDbConfig) -> Result<UpdateAck> {
        let mut stored = self.config.lock().unwrap();
        stored.get_or_insert_with(AppConfig::default).vector_db = Some(config.clone());
        Ok(ack("Vector database configuration updated"))
    }

    async fn update_complete_config(&self, config: &AppConfig) -> Result<UpdateAck> {
        *self.config.lock().unwrap() = Some(config.clone());
        Ok(ack("Configuration updated successfully"))
    }

    async fn reset_config(&self) -> Result<UpdateAck> {
        *self.config.lock().unwrap() = None;
        Ok(ack("Configuration reset"))
    }
}

/// Configuration backend whose reads wait until the test releases them.
pub struct GatedConfig {
    pub inner: Arc<StubBackend>,
    pub release: Notify,
}

#[async_trait]
impl ConfigApi for GatedConfig {
    async fn get_current_config(&self) -> Result<CurrentConfig> {
        self.release.notified().await;
        self.inner.get_current_config().await
    }

    async fn check_service_health(&self) -> Result<HealthStatus> {
        self.release.notified().await;
        self.inner.check_service_health().await
    }

    async fn update_embedder_config(&self, config: &EmbedderConfig) -> Result<UpdateAck> {
        self.inner.update_embedder_config(config).await
    }

    async fn update_vector_db_config(&self, config: &VectorDbConfig) -> Result<UpdateAck> {
        self.inner.update_vector_db_config(config).await
    }

    async fn update_complete_config(&self, config: &AppConfig) -> Result<UpdateAck> {
        self.inner.update_complete_config(config).await
    }

    async fn reset_config(&self) -> Result<UpdateAck> {
        self.inner.reset_config().await
    }
}

#[async_trait]
impl DocumentApi for StubBackend {
    async fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn upload_document(
        &self,
        filename: &str,
        _content: Vec<u8>,
    ) -> Result<DocumentUploadResponse> {
        let mut documents = self.documents.lock().unwrap();
        let document_id = format!("doc-{}", documents.len() + 1);
        documents.push(DocumentSummary {
            document_id: document_id.clone(),
            filename: filename.to_string(),
            chunk_count: 4,
            uploaded_at: None,
        });
        Ok(DocumentUploadResponse {
            document_id,
            filename: filename.to_string(),
            chunks_created: 4,
            message: None,
        })
    }
}

pub fn signed_in() -> Session {
    Session::authenticated(UserInfo {
        user_id: "u-1".to_string(),
        email: "ada@example.com".to_string(),
        username: "ada".to_string(),
        name: Some("Ada Lovelace".to_string()),
        ..Default::default()
    })
}

pub struct Harness {
    pub auth: Arc<SwitchableAuth>,
    pub backend: Arc<StubBackend>,
    pub shell: AppShell,
}

pub fn harness(session: Session) -> Harness {
    let auth = Arc::new(SwitchableAuth::new(session));
    let backend = Arc::new(StubBackend::default());
    let shell = AppShell::new(auth.clone(), backend.clone(), backend.clone());
    Harness {
        auth,
        backend,
        shell,
    }
}

pub struct GatedHarness {
    pub gate: Arc<GatedConfig>,
    pub shell: AppShell,
}

/// Shell whose configuration and health reads block on `gate.release`.
pub fn gated_harness(session: Session) -> GatedHarness {
    let auth = Arc::new(SwitchableAuth::new(session));
    let backend = Arc::new(StubBackend::default());
    let gate = Arc::new(GatedConfig {
        inner: backend.clone(),
        release: Notify::new(),
    });
    let shell = AppShell::new(auth, gate.clone(), backend);
    GatedHarness { gate, shell }
}
