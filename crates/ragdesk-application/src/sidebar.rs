//! Navigation sidebar model.

use ragdesk_core::route::Route;
use ragdesk_core::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub route: Route,
    pub title: &'static str,
    pub active: bool,
}

/// The account control at the bottom of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountAffordance {
    SignIn { login: Route, signup: Route },
    SignOut { display_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
    pub items: Vec<NavItem>,
    pub account: AccountAffordance,
}

impl Sidebar {
    /// Builds the sidebar for a session snapshot, highlighting `current`.
    pub fn build(session: &Session, current: Option<Route>) -> Self {
        let items = Route::navigation()
            .map(|route| NavItem {
                route,
                title: route.title(),
                active: current == Some(route),
            })
            .collect();

        let account = match session.user().filter(|_| session.is_authenticated) {
            Some(user) => AccountAffordance::SignOut {
                display_name: user.display_name(),
            },
            None if session.is_authenticated => AccountAffordance::SignOut {
                display_name: "Signed in".to_string(),
            },
            None => AccountAffordance::SignIn {
                login: Route::Login,
                signup: Route::Signup,
            },
        };

        Self { items, account }
    }

    pub fn active(&self) -> Option<Route> {
        self.items.iter().find(|item| item.active).map(|item| item.route)
    }
}
