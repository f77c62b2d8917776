//! Route gate deciding whether a view may render for a session.

use ragdesk_core::route::Route;
use ragdesk_core::session::Session;

/// Outcome of gating one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the requested route.
    Allow(Route),
    /// Render this route instead.
    Redirect(Route),
}

impl GateDecision {
    /// The route that ends up on screen.
    pub fn target(self) -> Route {
        match self {
            GateDecision::Allow(route) | GateDecision::Redirect(route) => route,
        }
    }

    pub fn is_redirect(self) -> bool {
        matches!(self, GateDecision::Redirect(_))
    }
}

/// Guards protected routes.
///
/// The gate holds no state: it is evaluated against a fresh session snapshot
/// on every navigation, so an expired session redirects on the next one.
pub struct AuthGate;

impl AuthGate {
    /// Where unauthenticated users are sent.
    pub const LOGIN_ROUTE: Route = Route::Login;

    pub fn resolve(session: &Session, route: Route) -> GateDecision {
        if !route.is_protected() || session.is_authenticated {
            GateDecision::Allow(route)
        } else {
            GateDecision::Redirect(Self::LOGIN_ROUTE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragdesk_core::session::UserInfo;
    use strum::IntoEnumIterator;

    fn signed_in() -> Session {
        Session::authenticated(UserInfo {
            user_id: "u-1".to_string(),
            email: "ada@example.com".to_string(),
            username: "ada".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_anonymous_session_is_redirected_from_every_protected_route() {
        let session = Session::anonymous();
        for route in Route::iter().filter(|r| r.is_protected()) {
            assert_eq!(
                AuthGate::resolve(&session, route),
                GateDecision::Redirect(Route::Login),
                "{route} should redirect"
            );
        }
    }

    #[test]
    fn test_authenticated_session_reaches_every_route() {
        let session = signed_in();
        for route in Route::iter() {
            assert_eq!(AuthGate::resolve(&session, route), GateDecision::Allow(route));
        }
    }

    #[test]
    fn test_public_routes_never_redirect() {
        let session = Session::anonymous();
        for route in [Route::Login, Route::Signup, Route::AuthCallback] {
            let decision = AuthGate::resolve(&session, route);
            assert!(!decision.is_redirect());
            assert_eq!(decision.target(), route);
        }
    }
}
