//! Tabbed configuration controller.
//!
//! The controller fetches the system configuration once per activation and
//! seeds four sub-panels from it. Tab switching never waits on that fetch:
//! every tab renders its loading fallback until the fetch resolves.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use ragdesk_core::api::ConfigApi;
use ragdesk_core::config::{
    AppConfig, ChatSettings, CurrentConfig, EmbedderConfig, PromptSettings, UpdateAck,
    VectorDbConfig,
};
use ragdesk_core::{RagdeskError, Result};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::generation::{FetchOutcome, Generation, Ticket};

/// The four configuration sub-panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum ConfigTab {
    #[default]
    Embedder,
    VectorDb,
    Chat,
    Prompts,
}

impl ConfigTab {
    pub fn key(self) -> &'static str {
        match self {
            ConfigTab::Embedder => "embedder",
            ConfigTab::VectorDb => "vectordb",
            ConfigTab::Chat => "chat",
            ConfigTab::Prompts => "prompts",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfigTab::Embedder => "Embedder",
            ConfigTab::VectorDb => "Vector Database",
            ConfigTab::Chat => "Chat",
            ConfigTab::Prompts => "Prompts",
        }
    }

    pub fn all() -> impl Iterator<Item = ConfigTab> {
        ConfigTab::iter()
    }
}

impl fmt::Display for ConfigTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ConfigTab {
    type Err = RagdeskError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        ConfigTab::iter()
            .find(|tab| tab.key() == wanted)
            .ok_or_else(|| RagdeskError::config(format!("unknown configuration tab '{s}'")))
    }
}

/// Where a panel's values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSource {
    /// The backend's configuration (fetched or confirmed by an update).
    Backend,
    /// The panel's own defaults; the backend had nothing for this section.
    Defaults,
}

/// Rendered content of the active sub-panel.
#[derive(Debug, Clone, PartialEq)]
pub enum TabPanel {
    /// The configuration has not been loaded yet.
    Loading(ConfigTab),
    Embedder {
        config: EmbedderConfig,
        source: PanelSource,
    },
    VectorDb {
        config: VectorDbConfig,
        source: PanelSource,
    },
    Chat(ChatSettings),
    Prompts(PromptSettings),
}

impl TabPanel {
    pub fn is_loading(&self) -> bool {
        matches!(self, TabPanel::Loading(_))
    }
}

/// Notification sent outward after a sub-panel saved successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    Updated(ConfigTab),
    /// Embedder and vector database were replaced in one request.
    Replaced,
    Reset,
}

/// Callback receiving [`ConfigChange`] notifications.
pub type ConfigChangedCallback = Arc<dyn Fn(ConfigChange) + Send + Sync>;

#[derive(Debug, Clone)]
struct PanelState {
    loading: bool,
    loaded: Option<AppConfig>,
    embedder: Option<EmbedderConfig>,
    vector_db: Option<VectorDbConfig>,
    chat: ChatSettings,
    prompts: PromptSettings,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            loading: true,
            loaded: None,
            embedder: None,
            vector_db: None,
            chat: ChatSettings::default(),
            prompts: PromptSettings::default(),
        }
    }
}

/// Controller behind the configuration page.
///
/// One controller lives for one page mount: the active tab starts at
/// [`ConfigTab::Embedder`] and the configuration is fetched at most once.
/// Updates are applied to the local copies and announced through the change
/// callback; the controller never re-fetches after an update.
pub struct ConfigTabController {
    api: Arc<dyn ConfigApi>,
    active: Mutex<ConfigTab>,
    state: RwLock<PanelState>,
    fetch_started: AtomicBool,
    generation: Generation,
    on_change: Option<ConfigChangedCallback>,
}

impl ConfigTabController {
    pub fn new(api: Arc<dyn ConfigApi>) -> Self {
        Self {
            api,
            active: Mutex::new(ConfigTab::default()),
            state: RwLock::new(PanelState::default()),
            fetch_started: AtomicBool::new(false),
            generation: Generation::new(),
            on_change: None,
        }
    }

    /// Registers the callback notified after successful updates.
    pub fn with_change_callback(mut self, callback: ConfigChangedCallback) -> Self {
        self.on_change = Some(callback);
        self
    }

    /// Fetches the configuration; only the first call issues a request.
    ///
    /// A failed fetch is logged and treated as "no configuration", so every
    /// panel falls back to its own defaults.
    pub async fn activate(&self) -> FetchOutcome {
        let Some(ticket) = self.claim_fetch() else {
            return FetchOutcome::Skipped;
        };
        let result = self.api.get_current_config().await;
        self.apply_fetched(ticket, result).await
    }

    /// Starts the configuration fetch on a runtime task and returns at once.
    ///
    /// Returns `None` when the fetch was already started for this mount.
    pub fn spawn_activate(self: &Arc<Self>) -> Option<JoinHandle<FetchOutcome>> {
        let ticket = self.claim_fetch()?;
        let controller = Arc::clone(self);
        Some(tokio::spawn(async move {
            let result = controller.api.get_current_config().await;
            controller.apply_fetched(ticket, result).await
        }))
    }

    fn claim_fetch(&self) -> Option<Ticket> {
        if self.fetch_started.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(self.generation.begin())
    }

    async fn apply_fetched(&self, ticket: Ticket, result: Result<CurrentConfig>) -> FetchOutcome {
        let mut state = self.state.write().await;
        if !self.generation.is_current(ticket) {
            tracing::debug!("Discarding configuration fetched after unmount");
            return FetchOutcome::Discarded;
        }

        let config = match result {
            Ok(current) => {
                let message = current.message.clone();
                let config = current.into_config();
                if config.is_none() {
                    tracing::info!(
                        "Backend has no configuration yet: {}",
                        message.as_deref().unwrap_or("not configured")
                    );
                }
                config
            }
            Err(e) => {
                tracing::warn!("Failed to fetch configuration, using panel defaults: {}", e);
                None
            }
        };

        state.embedder = config.as_ref().and_then(|c| c.embedder.clone());
        state.vector_db = config.as_ref().and_then(|c| c.vector_db.clone());
        state.loaded = config;
        state.loading = false;
        FetchOutcome::Applied
    }

    /// Drops any in-flight fetch result.
    pub fn unmount(&self) {
        self.generation.invalidate();
    }

    pub fn active_tab(&self) -> ConfigTab {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switches the active tab. Never triggers a fetch.
    pub fn select(&self, tab: ConfigTab) {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner) = tab;
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// The configuration as fetched, before any local edits.
    pub async fn loaded_config(&self) -> Option<AppConfig> {
        self.state.read().await.loaded.clone()
    }

    /// Renders the active tab.
    pub async fn panel(&self) -> TabPanel {
        let tab = self.active_tab();
        let state = self.state.read().await;
        if state.loading {
            return TabPanel::Loading(tab);
        }

        match tab {
            ConfigTab::Embedder => match &state.embedder {
                Some(config) => TabPanel::Embedder {
                    config: config.clone(),
                    source: PanelSource::Backend,
                },
                None => TabPanel::Embedder {
                    config: EmbedderConfig::default(),
                    source: PanelSource::Defaults,
                },
            },
            ConfigTab::VectorDb => match &state.vector_db {
                Some(config) => TabPanel::VectorDb {
                    config: config.clone(),
                    source: PanelSource::Backend,
                },
                None => TabPanel::VectorDb {
                    config: VectorDbConfig::default(),
                    source: PanelSource::Defaults,
                },
            },
            ConfigTab::Chat => TabPanel::Chat(state.chat.clone()),
            ConfigTab::Prompts => TabPanel::Prompts(state.prompts.clone()),
        }
    }

    /// Saves the embedder section through the backend.
    pub async fn submit_embedder(&self, config: EmbedderConfig) -> Result<UpdateAck> {
        self.ensure_loaded().await?;
        let ack = self
            .api
            .update_embedder_config(&config)
            .await
            .inspect_err(|e| tracing::warn!("Embedder update rejected: {}", e))?;

        self.state.write().await.embedder = Some(config);
        self.notify(ConfigChange::Updated(ConfigTab::Embedder));
        Ok(ack)
    }

    /// Saves the vector database section through the backend.
    pub async fn submit_vector_db(&self, config: VectorDbConfig) -> Result<UpdateAck> {
        self.ensure_loaded().await?;
        let ack = self
            .api
            .update_vector_db_config(&config)
            .await
            .inspect_err(|e| tracing::warn!("Vector database update rejected: {}", e))?;

        self.state.write().await.vector_db = Some(config);
        self.notify(ConfigChange::Updated(ConfigTab::VectorDb));
        Ok(ack)
    }

    /// Saves the embedder and vector database sections in one request.
    ///
    /// The fetched configuration's upload and chunking limits are kept.
    pub async fn submit_complete(
        &self,
        embedder: EmbedderConfig,
        vector_db: VectorDbConfig,
    ) -> Result<UpdateAck> {
        self.ensure_loaded().await?;
        let config = AppConfig {
            embedder: Some(embedder.clone()),
            vector_db: Some(vector_db.clone()),
            ..self.loaded_config().await.unwrap_or_default()
        };
        let ack = self
            .api
            .update_complete_config(&config)
            .await
            .inspect_err(|e| tracing::warn!("Configuration update rejected: {}", e))?;

        {
            let mut state = self.state.write().await;
            state.embedder = Some(embedder);
            state.vector_db = Some(vector_db);
        }
        self.notify(ConfigChange::Replaced);
        Ok(ack)
    }

    pub async fn apply_chat(&self, settings: ChatSettings) -> Result<()> {
        self.ensure_loaded().await?;
        if !(0.0..=2.0).contains(&settings.temperature) {
            return Err(RagdeskError::config(format!(
                "temperature must be between 0 and 2, got {}",
                settings.temperature
            )));
        }
        if settings.max_tokens == 0 || settings.rag_top_k == 0 {
            return Err(RagdeskError::config(
                "max_tokens and rag_top_k must be positive",
            ));
        }

        self.state.write().await.chat = settings;
        self.notify(ConfigChange::Updated(ConfigTab::Chat));
        Ok(())
    }

    pub async fn apply_prompts(&self, settings: PromptSettings) -> Result<()> {
        self.ensure_loaded().await?;
        if !settings.is_template_complete() {
            return Err(RagdeskError::config(
                "context template must contain {context} and {question}",
            ));
        }

        self.state.write().await.prompts = settings;
        self.notify(ConfigChange::Updated(ConfigTab::Prompts));
        Ok(())
    }

    /// Asks the backend to restore its defaults and clears the local copies.
    pub async fn reset(&self) -> Result<UpdateAck> {
        self.ensure_loaded().await?;
        let ack = self
            .api
            .reset_config()
            .await
            .inspect_err(|e| tracing::warn!("Configuration reset failed: {}", e))?;

        {
            let mut state = self.state.write().await;
            state.embedder = None;
            state.vector_db = None;
            state.chat = ChatSettings::default();
            state.prompts = PromptSettings::default();
        }
        self.notify(ConfigChange::Reset);
        Ok(ack)
    }

    async fn ensure_loaded(&self) -> Result<()> {
        if self.state.read().await.loading {
            return Err(RagdeskError::config("configuration is still loading"));
        }
        Ok(())
    }

    fn notify(&self, change: ConfigChange) {
        tracing::info!("Configuration changed: {:?}", change);
        if let Some(callback) = &self.on_change {
            callback(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ragdesk_core::config::{CurrentConfig, EmbedderType, OpenAiEmbedderConfig};
    use ragdesk_core::health::HealthStatus;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    // Mock ConfigApi whose config fetch can be held pending
    struct MockConfigApi {
        current: Result<CurrentConfig>,
        gate: Option<Arc<Notify>>,
        fetches: AtomicUsize,
        updates: AtomicUsize,
        reject_updates: bool,
        last_complete: Mutex<Option<AppConfig>>,
    }

    impl MockConfigApi {
        fn returning(current: Result<CurrentConfig>) -> Self {
            Self {
                current,
                gate: None,
                fetches: AtomicUsize::new(0),
                updates: AtomicUsize::new(0),
                reject_updates: false,
                last_complete: Mutex::new(None),
            }
        }

        fn gated(current: Result<CurrentConfig>, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::returning(current)
            }
        }
    }

    #[async_trait]
    impl ConfigApi for MockConfigApi {
        async fn get_current_config(&self) -> Result<CurrentConfig> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.current.clone()
        }

        async fn check_service_health(&self) -> Result<HealthStatus> {
            Err(RagdeskError::internal("not used"))
        }

        async fn update_embedder_config(&self, _config: &EmbedderConfig) -> Result<UpdateAck> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            if self.reject_updates {
                return Err(RagdeskError::server(400, "Embedder health check failed"));
            }
            Ok(UpdateAck {
                message: "Embedder configuration updated successfully".to_string(),
                ..Default::default()
            })
        }

        async fn update_vector_db_config(&self, _config: &VectorDbConfig) -> Result<UpdateAck> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            Ok(UpdateAck::default())
        }

        async fn update_complete_config(&self, config: &AppConfig) -> Result<UpdateAck> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            *self.last_complete.lock().unwrap() = Some(config.clone());
            Ok(UpdateAck::default())
        }

        async fn reset_config(&self) -> Result<UpdateAck> {
            Ok(UpdateAck::default())
        }
    }

    fn openai_embedder() -> EmbedderConfig {
        EmbedderConfig {
            kind: EmbedderType::OpenAi,
            openai: Some(OpenAiEmbedderConfig {
                api_key: "sk-test".to_string(),
                model_name: "text-embedding-3-small".to_string(),
                organization: None,
                timeout: 30,
            }),
            huggingface: None,
        }
    }

    fn embedder_only() -> CurrentConfig {
        CurrentConfig {
            configured: true,
            config: Some(AppConfig {
                embedder: Some(openai_embedder()),
                ..Default::default()
            }),
            message: None,
        }
    }

    fn change_recorder() -> (ConfigChangedCallback, Arc<Mutex<Vec<ConfigChange>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let callback: ConfigChangedCallback = Arc::new(move |change| {
            sink.lock().unwrap().push(change);
        });
        (callback, seen)
    }

    #[tokio::test]
    async fn test_tabs_render_loading_while_fetch_pending() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(MockConfigApi::gated(Ok(embedder_only()), gate.clone()));
        let controller = Arc::new(ConfigTabController::new(api.clone()));

        let activating = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.activate().await })
        };
        tokio::task::yield_now().await;

        for tab in ConfigTab::all() {
            controller.select(tab);
            assert_eq!(controller.panel().await, TabPanel::Loading(tab));
        }

        gate.notify_one();
        assert_eq!(activating.await.unwrap(), FetchOutcome::Applied);
        assert!(!controller.is_loading().await);
        assert_eq!(api.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_section_renders_panel_defaults() {
        let api = Arc::new(MockConfigApi::returning(Ok(embedder_only())));
        let controller = ConfigTabController::new(api);
        controller.activate().await;

        assert_eq!(
            controller.panel().await,
            TabPanel::Embedder {
                config: openai_embedder(),
                source: PanelSource::Backend,
            }
        );

        controller.select(ConfigTab::VectorDb);
        assert_eq!(
            controller.panel().await,
            TabPanel::VectorDb {
                config: VectorDbConfig::default(),
                source: PanelSource::Defaults,
            }
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_falls_back_to_defaults() {
        let api = Arc::new(MockConfigApi::returning(Err(RagdeskError::network(
            "connection refused",
        ))));
        let controller = ConfigTabController::new(api);

        assert_eq!(controller.activate().await, FetchOutcome::Applied);
        assert!(controller.loaded_config().await.is_none());
        assert!(matches!(
            controller.panel().await,
            TabPanel::Embedder {
                source: PanelSource::Defaults,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_activate_fetches_only_once() {
        let api = Arc::new(MockConfigApi::returning(Ok(embedder_only())));
        let controller = ConfigTabController::new(api.clone());

        assert_eq!(controller.activate().await, FetchOutcome::Applied);
        assert_eq!(controller.activate().await, FetchOutcome::Skipped);
        controller.select(ConfigTab::Chat);
        controller.select(ConfigTab::Embedder);
        assert_eq!(api.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_resolving_after_unmount_is_discarded() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(MockConfigApi::gated(Ok(embedder_only()), gate.clone()));
        let controller = Arc::new(ConfigTabController::new(api));

        let activating = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.activate().await })
        };
        tokio::task::yield_now().await;

        controller.unmount();
        gate.notify_one();

        assert_eq!(activating.await.unwrap(), FetchOutcome::Discarded);
        assert!(controller.is_loading().await);
    }

    #[tokio::test]
    async fn test_successful_update_notifies_once_without_refetch() {
        let api = Arc::new(MockConfigApi::returning(Ok(embedder_only())));
        let (callback, seen) = change_recorder();
        let controller = ConfigTabController::new(api.clone()).with_change_callback(callback);
        controller.activate().await;

        controller.select(ConfigTab::VectorDb);
        let qdrant: VectorDbConfig =
            serde_json::from_str(r#"{"type": "qdrant", "qdrant": {}}"#).unwrap();
        controller.submit_vector_db(qdrant.clone()).await.unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![ConfigChange::Updated(ConfigTab::VectorDb)]
        );
        assert_eq!(api.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(
            controller.panel().await,
            TabPanel::VectorDb {
                config: qdrant,
                source: PanelSource::Backend,
            }
        );
    }

    #[tokio::test]
    async fn test_rejected_update_keeps_local_copy_and_stays_silent() {
        let mut api = MockConfigApi::returning(Ok(embedder_only()));
        api.reject_updates = true;
        let (callback, seen) = change_recorder();
        let controller = ConfigTabController::new(Arc::new(api)).with_change_callback(callback);
        controller.activate().await;

        let err = controller
            .submit_embedder(EmbedderConfig::default())
            .await
            .unwrap_err();

        assert!(err.is_fetch_failure());
        assert!(seen.lock().unwrap().is_empty());
        assert!(matches!(
            controller.panel().await,
            TabPanel::Embedder { config, .. } if config == openai_embedder()
        ));
    }

    #[tokio::test]
    async fn test_updates_refused_while_loading() {
        let api = Arc::new(MockConfigApi::returning(Ok(embedder_only())));
        let controller = ConfigTabController::new(api.clone());

        let err = controller
            .apply_chat(ChatSettings::default())
            .await
            .unwrap_err();
        assert!(err.is_config());
        assert_eq!(api.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_prompt_template_is_validated() {
        let api = Arc::new(MockConfigApi::returning(Ok(embedder_only())));
        let controller = ConfigTabController::new(api);
        controller.activate().await;

        let broken = PromptSettings {
            context_template: "{question}".to_string(),
            ..Default::default()
        };
        assert!(controller.apply_prompts(broken).await.is_err());
    }

    #[tokio::test]
    async fn test_complete_submit_keeps_fetched_limits() {
        let mut current = embedder_only();
        if let Some(config) = current.config.as_mut() {
            config.chunk_size = 512;
        }
        let api = Arc::new(MockConfigApi::returning(Ok(current)));
        let (callback, seen) = change_recorder();
        let controller = ConfigTabController::new(api.clone()).with_change_callback(callback);
        controller.activate().await;

        let qdrant: VectorDbConfig =
            serde_json::from_str(r#"{"type": "qdrant", "qdrant": {}}"#).unwrap();
        controller
            .submit_complete(openai_embedder(), qdrant.clone())
            .await
            .unwrap();

        let sent = api.last_complete.lock().unwrap().clone().unwrap();
        assert_eq!(sent.chunk_size, 512);
        assert_eq!(sent.embedder, Some(openai_embedder()));
        assert_eq!(sent.vector_db, Some(qdrant.clone()));
        assert_eq!(*seen.lock().unwrap(), vec![ConfigChange::Replaced]);

        controller.select(ConfigTab::VectorDb);
        assert_eq!(
            controller.panel().await,
            TabPanel::VectorDb {
                config: qdrant,
                source: PanelSource::Backend,
            }
        );
    }

    #[tokio::test]
    async fn test_spawned_activation_applies_in_background() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(MockConfigApi::gated(Ok(embedder_only()), gate.clone()));
        let controller = Arc::new(ConfigTabController::new(api.clone()));

        let task = controller.spawn_activate().unwrap();
        assert!(controller.spawn_activate().is_none());
        assert!(controller.is_loading().await);

        gate.notify_one();
        assert_eq!(task.await.unwrap(), FetchOutcome::Applied);
        assert!(!controller.is_loading().await);
        assert_eq!(api.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reset_clears_sections_and_notifies() {
        let api = Arc::new(MockConfigApi::returning(Ok(embedder_only())));
        let (callback, seen) = change_recorder();
        let controller = ConfigTabController::new(api).with_change_callback(callback);
        controller.activate().await;

        controller.reset().await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![ConfigChange::Reset]);
        assert!(matches!(
            controller.panel().await,
            TabPanel::Embedder {
                source: PanelSource::Defaults,
                ..
            }
        ));
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("vectordb".parse::<ConfigTab>().unwrap(), ConfigTab::VectorDb);
        assert_eq!(" Prompts ".parse::<ConfigTab>().unwrap(), ConfigTab::Prompts);
        assert!("logging".parse::<ConfigTab>().is_err());
        assert_eq!(ConfigTab::all().count(), 4);
    }
}
