use std::sync::Arc;

use async_trait::async_trait;
use ragdesk_core::api::ConfigApi;
use ragdesk_core::route::Route;
use ragdesk_core::{RagdeskError, Result};

use super::{BackgroundFetch, Page, PageAction};
use crate::health::HealthAggregator;
use crate::screen::{Screen, ScreenBody};

/// Health page. Checks in the background on mount and on every explicit
/// refresh.
pub struct HealthPage {
    aggregator: Arc<HealthAggregator>,
    fetch: BackgroundFetch,
}

impl HealthPage {
    pub fn new(api: Arc<dyn ConfigApi>) -> Self {
        Self {
            aggregator: Arc::new(HealthAggregator::new(api)),
            fetch: BackgroundFetch::default(),
        }
    }

    pub fn aggregator(&self) -> &HealthAggregator {
        &self.aggregator
    }

    async fn start_check(&self) {
        let task = self.aggregator.spawn_fetch().await;
        self.fetch.track(task);
    }
}

#[async_trait]
impl Page for HealthPage {
    fn route(&self) -> Route {
        Route::Health
    }

    async fn mount(&self) -> Result<()> {
        self.start_check().await;
        Ok(())
    }

    async fn settle(&self) -> Result<()> {
        self.fetch.settle(Route::Health).await
    }

    async fn render(&self) -> Result<Screen> {
        self.fetch.check(Route::Health).await?;
        Ok(Screen::new(
            Route::Health.title(),
            ScreenBody::Health(self.aggregator.display().await),
        ))
    }

    async fn handle(&self, action: PageAction) -> Result<()> {
        match action {
            PageAction::Refresh => {
                self.start_check().await;
                Ok(())
            }
            other => Err(RagdeskError::internal(format!(
                "health page does not handle '{}'",
                other.name()
            ))),
        }
    }

    fn unmount(&self) {
        self.aggregator.unmount();
        self.fetch.abort();
    }
}
