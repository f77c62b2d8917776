use std::sync::Arc;

use async_trait::async_trait;
use ragdesk_core::api::ConfigApi;
use ragdesk_core::route::Route;
use ragdesk_core::{RagdeskError, Result};

use super::{BackgroundFetch, Page, PageAction};
use crate::config_tab::{ConfigChangedCallback, ConfigTab, ConfigTabController, TabPanel};
use crate::screen::{Screen, ScreenBody};

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigView {
    pub tabs: Vec<ConfigTab>,
    pub active: ConfigTab,
    pub panel: TabPanel,
}

/// Configuration page. Owns one [`ConfigTabController`] per mount.
pub struct ConfigPage {
    controller: Arc<ConfigTabController>,
    fetch: BackgroundFetch,
}

impl ConfigPage {
    pub fn new(api: Arc<dyn ConfigApi>, on_change: ConfigChangedCallback) -> Self {
        Self {
            controller: Arc::new(ConfigTabController::new(api).with_change_callback(on_change)),
            fetch: BackgroundFetch::default(),
        }
    }

    pub fn controller(&self) -> &ConfigTabController {
        &self.controller
    }
}

#[async_trait]
impl Page for ConfigPage {
    fn route(&self) -> Route {
        Route::Config
    }

    async fn mount(&self) -> Result<()> {
        if let Some(task) = self.controller.spawn_activate() {
            self.fetch.track(task);
        }
        Ok(())
    }

    async fn settle(&self) -> Result<()> {
        self.fetch.settle(Route::Config).await
    }

    async fn render(&self) -> Result<Screen> {
        self.fetch.check(Route::Config).await?;
        let view = ConfigView {
            tabs: ConfigTab::all().collect(),
            active: self.controller.active_tab(),
            panel: self.controller.panel().await,
        };
        Ok(Screen::new(Route::Config.title(), ScreenBody::Config(view)))
    }

    async fn handle(&self, action: PageAction) -> Result<()> {
        match action {
            PageAction::SelectTab(tab) => {
                self.controller.select(tab);
                Ok(())
            }
            PageAction::SubmitEmbedder(config) => {
                self.controller.submit_embedder(config).await.map(|_| ())
            }
            PageAction::SubmitVectorDb(config) => {
                self.controller.submit_vector_db(config).await.map(|_| ())
            }
            PageAction::SubmitComplete {
                embedder,
                vector_db,
            } => self
                .controller
                .submit_complete(embedder, vector_db)
                .await
                .map(|_| ()),
            PageAction::ApplyChat(settings) => self.controller.apply_chat(settings).await,
            PageAction::ApplyPrompts(settings) => self.controller.apply_prompts(settings).await,
            PageAction::ResetConfig => self.controller.reset().await.map(|_| ()),
            // The configuration is fetched once per mount; remount to reload it
            PageAction::Refresh => Ok(()),
            PageAction::Upload { .. } => Err(RagdeskError::internal(
                "configuration page does not handle 'upload'",
            )),
        }
    }

    fn unmount(&self) {
        self.controller.unmount();
        self.fetch.abort();
    }
}
