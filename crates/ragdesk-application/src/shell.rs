//! Application shell: gate, mount, render.
//!
//! [`AppShell`] owns the page that is currently mounted. Every navigation
//! takes a fresh session snapshot, resolves it through the [`AuthGate`],
//! unmounts the previous page and mounts a newly built one inside the
//! [`ErrorBoundary`]. A page failing or panicking produces a failure screen
//! while the sidebar keeps rendering.
//!
//! Mounting never waits on slow backend calls: pages start them on runtime
//! tasks and render their loading state. [`AppShell::render_current`] shows
//! progress and [`AppShell::settle`] waits for the pending fetches.

use std::sync::Arc;

use ragdesk_core::api::{ConfigApi, DocumentApi};
use ragdesk_core::document::DocumentUploadResponse;
use ragdesk_core::route::Route;
use ragdesk_core::session::{AuthProvider, Session};
use ragdesk_core::{RagdeskError, Result};
use tokio::sync::Mutex;

use crate::auth_gate::AuthGate;
use crate::boundary::ErrorBoundary;
use crate::config_tab::{ConfigChange, ConfigChangedCallback};
use crate::pages::{ConfigPage, DocumentsPage, HealthPage, LeafPage, Page, PageAction, UploadPage};
use crate::refresh_bus::RefreshBus;
use crate::screen::Screen;
use crate::sidebar::Sidebar;

/// Result of one navigation or dispatched action.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// The path the caller asked for.
    pub requested: String,
    /// The route actually shown; `None` for an unknown path.
    pub shown: Option<Route>,
    pub redirected: bool,
    pub sidebar: Sidebar,
    pub screen: Screen,
}

struct Mounted {
    route: Route,
    page: Arc<dyn Page>,
}

/// The root of the client view tree.
pub struct AppShell {
    auth: Arc<dyn AuthProvider>,
    config_api: Arc<dyn ConfigApi>,
    document_api: Arc<dyn DocumentApi>,
    refresh_bus: RefreshBus,
    config_bus: RefreshBus,
    current: Mutex<Option<Mounted>>,
}

impl AppShell {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        config_api: Arc<dyn ConfigApi>,
        document_api: Arc<dyn DocumentApi>,
    ) -> Self {
        Self {
            auth,
            config_api,
            document_api,
            refresh_bus: RefreshBus::new(),
            config_bus: RefreshBus::new(),
            current: Mutex::new(None),
        }
    }

    /// Navigates to `route`, redirecting to login when the gate says so.
    pub async fn navigate(&self, route: Route) -> Rendered {
        self.show(route.path().to_string(), route).await
    }

    /// Navigates to a raw path such as `/documents?page=2`.
    ///
    /// Unknown paths unmount the current page and render a not-found screen.
    pub async fn navigate_path(&self, path: &str) -> Rendered {
        match Route::from_path(path) {
            Ok(route) => self.show(path.to_string(), route).await,
            Err(e) => {
                tracing::info!("{}", e);
                self.swap(None).await;
                let session = self.auth.session().await;
                Rendered {
                    requested: path.to_string(),
                    shown: None,
                    redirected: false,
                    sidebar: Sidebar::build(&session, None),
                    screen: Screen::not_found(path),
                }
            }
        }
    }

    /// Sends `action` to the mounted page and renders it again.
    ///
    /// Errors from the action are returned unchanged; a panic comes back as
    /// [`RagdeskError::Render`].
    pub async fn dispatch(&self, action: PageAction) -> Result<Rendered> {
        let (route, page) = self
            .mounted()
            .await
            .ok_or_else(|| RagdeskError::internal("no page is mounted"))?;

        let session = self.auth.session().await;
        if AuthGate::resolve(&session, route).is_redirect() {
            return Err(RagdeskError::auth(format!(
                "sign in to use {}",
                route.title()
            )));
        }

        let stage = action.name();
        tracing::debug!(route = %route, action = stage, "Dispatching page action");
        ErrorBoundary::contain(route, stage, page.handle(action)).await?;

        let screen = ErrorBoundary::render(route, page.render()).await;
        Ok(Self::rendered_in_place(&session, route, screen))
    }

    /// Renders the mounted page again without sending it anything.
    ///
    /// A session that ended since the page was mounted goes back through the
    /// gate and lands on the login page.
    pub async fn render_current(&self) -> Result<Rendered> {
        let (route, page) = self
            .mounted()
            .await
            .ok_or_else(|| RagdeskError::internal("no page is mounted"))?;

        let session = self.auth.session().await;
        if AuthGate::resolve(&session, route).is_redirect() {
            return Ok(self.show(route.path().to_string(), route).await);
        }
        let screen = ErrorBoundary::render(route, page.render()).await;
        Ok(Self::rendered_in_place(&session, route, screen))
    }

    /// Waits for the mounted page's background fetches, then renders it.
    pub async fn settle(&self) -> Result<Rendered> {
        let (route, page) = self
            .mounted()
            .await
            .ok_or_else(|| RagdeskError::internal("no page is mounted"))?;

        let screen = match ErrorBoundary::run(route, "settle", page.settle()).await {
            Ok(()) => return self.render_current().await,
            Err(e) => ErrorBoundary::fallback(route, &e),
        };
        let session = self.auth.session().await;
        Ok(Self::rendered_in_place(&session, route, screen))
    }

    /// Explicit refresh of the mounted page.
    pub async fn refresh(&self) -> Result<Rendered> {
        self.dispatch(PageAction::Refresh).await
    }

    /// Uploads a document through the upload view, mounting it first if
    /// another page is showing.
    pub async fn upload(&self, filename: impl Into<String>, content: Vec<u8>) -> Result<Rendered> {
        if self.current_route().await != Some(Route::Upload) {
            let rendered = self.navigate(Route::Upload).await;
            if rendered.redirected {
                return Err(RagdeskError::auth("sign in to upload documents"));
            }
        }
        self.dispatch(PageAction::Upload {
            filename: filename.into(),
            content,
        })
        .await
    }

    /// Signals an upload finished outside the shell's own upload view.
    pub fn complete_upload(&self, response: &DocumentUploadResponse) -> u64 {
        let token = self.refresh_bus.bump();
        tracing::info!(
            document_id = %response.document_id,
            refresh_token = token,
            "Upload of {} completed",
            response.filename
        );
        token
    }

    /// Logs out through the auth provider.
    ///
    /// Returns `false` when the provider failed; the session is then left
    /// as it was. Callers navigate again to apply the gate.
    pub async fn logout(&self) -> bool {
        match self.auth.logout().await {
            Ok(()) => {
                tracing::info!("Signed out");
                true
            }
            Err(e) => {
                tracing::warn!("Logout failed: {}", e);
                false
            }
        }
    }

    pub async fn session(&self) -> Session {
        self.auth.session().await
    }

    pub async fn current_route(&self) -> Option<Route> {
        self.current.lock().await.as_ref().map(|mounted| mounted.route)
    }

    pub fn refresh_bus(&self) -> &RefreshBus {
        &self.refresh_bus
    }

    /// Number of configuration changes saved since start-up.
    pub fn config_revision(&self) -> u64 {
        self.config_bus.current()
    }

    async fn show(&self, requested: String, route: Route) -> Rendered {
        let session = self.auth.session().await;
        let decision = AuthGate::resolve(&session, route);
        let target = decision.target();
        if decision.is_redirect() {
            tracing::info!(from = %route, to = %target, "Redirecting unauthenticated user");
        }

        let page = self.build_page(target);
        self.swap(Some(Mounted {
            route: target,
            page: page.clone(),
        }))
        .await;

        let screen = match ErrorBoundary::run(target, "mount", page.mount()).await {
            Ok(()) => ErrorBoundary::render(target, page.render()).await,
            Err(e) => ErrorBoundary::fallback(target, &e),
        };

        Rendered {
            requested,
            shown: Some(target),
            redirected: decision.is_redirect(),
            sidebar: Sidebar::build(&session, Some(target)),
            screen,
        }
    }

    fn rendered_in_place(session: &Session, route: Route, screen: Screen) -> Rendered {
        Rendered {
            requested: route.path().to_string(),
            shown: Some(route),
            redirected: false,
            sidebar: Sidebar::build(session, Some(route)),
            screen,
        }
    }

    async fn swap(&self, next: Option<Mounted>) {
        let mut current = self.current.lock().await;
        if let Some(previous) = current.take() {
            previous.page.unmount();
        }
        *current = next;
    }

    async fn mounted(&self) -> Option<(Route, Arc<dyn Page>)> {
        self.current
            .lock()
            .await
            .as_ref()
            .map(|mounted| (mounted.route, mounted.page.clone()))
    }

    fn build_page(&self, route: Route) -> Arc<dyn Page> {
        match route {
            Route::Upload => Arc::new(UploadPage::new(
                self.document_api.clone(),
                self.refresh_bus.clone(),
            )),
            Route::Documents => Arc::new(DocumentsPage::new(
                self.document_api.clone(),
                self.refresh_bus.subscribe(),
            )),
            Route::Config => Arc::new(ConfigPage::new(
                self.config_api.clone(),
                self.config_changed_callback(),
            )),
            Route::Health => Arc::new(HealthPage::new(self.config_api.clone())),
            Route::Login | Route::Signup | Route::AuthCallback | Route::Chat | Route::Search => {
                Arc::new(LeafPage::new(route))
            }
        }
    }

    fn config_changed_callback(&self) -> ConfigChangedCallback {
        let bus = self.config_bus.clone();
        Arc::new(move |change: ConfigChange| {
            let revision = bus.bump();
            tracing::info!(?change, revision, "Configuration changed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ragdesk_core::config::{
        AppConfig, CurrentConfig, EmbedderConfig, UpdateAck, VectorDbConfig,
    };
    use ragdesk_core::document::DocumentSummary;
    use ragdesk_core::health::HealthStatus;
    use ragdesk_core::session::UserInfo;
    use crate::screen::ScreenBody;

    struct FixedAuth(Session);

    #[async_trait]
    impl AuthProvider for FixedAuth {
        async fn session(&self) -> Session {
            self.0.clone()
        }

        async fn logout(&self) -> Result<()> {
            Err(RagdeskError::auth("identity provider unreachable"))
        }
    }

    struct OfflineApi;

    #[async_trait]
    impl ConfigApi for OfflineApi {
        async fn get_current_config(&self) -> Result<CurrentConfig> {
            Err(RagdeskError::network("offline"))
        }

        async fn check_service_health(&self) -> Result<HealthStatus> {
            Err(RagdeskError::network("offline"))
        }

        async fn update_embedder_config(&self, _config: &EmbedderConfig) -> Result<UpdateAck> {
            Err(RagdeskError::network("offline"))
        }

        async fn update_vector_db_config(&self, _config: &VectorDbConfig) -> Result<UpdateAck> {
            Err(RagdeskError::network("offline"))
        }

        async fn update_complete_config(&self, _config: &AppConfig) -> Result<UpdateAck> {
            Err(RagdeskError::network("offline"))
        }

        async fn reset_config(&self) -> Result<UpdateAck> {
            Err(RagdeskError::network("offline"))
        }
    }

    #[async_trait]
    impl DocumentApi for OfflineApi {
        async fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
            Err(RagdeskError::network("offline"))
        }

        async fn upload_document(
            &self,
            _filename: &str,
            _content: Vec<u8>,
        ) -> Result<DocumentUploadResponse> {
            Err(RagdeskError::network("offline"))
        }
    }

    fn shell(session: Session) -> AppShell {
        let api = Arc::new(OfflineApi);
        AppShell::new(Arc::new(FixedAuth(session)), api.clone(), api)
    }

    #[tokio::test]
    async fn test_anonymous_user_is_redirected_to_login() {
        let shell = shell(Session::anonymous());
        let rendered = shell.navigate(Route::Health).await;

        assert!(rendered.redirected);
        assert_eq!(rendered.shown, Some(Route::Login));
        assert_eq!(shell.current_route().await, Some(Route::Login));
    }

    #[tokio::test]
    async fn test_unknown_path_renders_not_found() {
        let shell = shell(Session::authenticated(UserInfo::default()));
        shell.navigate(Route::Chat).await;

        let rendered = shell.navigate_path("/nowhere").await;
        assert_eq!(rendered.shown, None);
        assert_eq!(
            rendered.screen.body,
            ScreenBody::NotFound {
                path: "/nowhere".to_string()
            }
        );
        assert_eq!(shell.current_route().await, None);
    }

    #[tokio::test]
    async fn test_dispatch_without_page_fails() {
        let shell = shell(Session::authenticated(UserInfo::default()));
        assert!(shell.refresh().await.is_err());
    }

    #[tokio::test]
    async fn test_offline_health_settles_to_failure_panel() {
        let shell = shell(Session::authenticated(UserInfo::default()));
        shell.navigate(Route::Health).await;

        let rendered = shell.settle().await.unwrap();
        assert!(matches!(
            rendered.screen.body,
            ScreenBody::Health(crate::health::HealthDisplay::Failed { .. })
        ));
        assert_eq!(shell.render_current().await.unwrap(), rendered);
    }

    #[tokio::test]
    async fn test_render_without_page_fails() {
        let shell = shell(Session::anonymous());
        assert!(shell.render_current().await.is_err());
        assert!(shell.settle().await.is_err());
    }

    #[tokio::test]
    async fn test_failed_logout_reports_false() {
        let shell = shell(Session::authenticated(UserInfo::default()));
        assert!(!shell.logout().await);
        assert!(shell.session().await.is_authenticated);
    }
}
