//! Route guard.
//!
//! A pure decision function of (requested path, session status). It holds no
//! state and performs no I/O, so navigation policy can be unit tested
//! without a running UI.

use crate::session::SessionStatus;

/// Paths reachable without a credential.
const PUBLIC_PATHS: &[&str] = &["/login", "/register"];

/// Outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested route.
    Allow,
    /// Navigate to the given path instead.
    RedirectTo(&'static str),
}

/// Decides whether a navigation to `path` is allowed for the given session
/// status.
///
/// Policy: `/login` and `/register` are always allowed; the root path
/// forwards to the dashboard or the login page depending on the session;
/// every other path requires an authenticated session.
pub fn decide(path: &str, status: SessionStatus) -> RouteDecision {
    let authenticated = status == SessionStatus::Authenticated;

    if PUBLIC_PATHS.contains(&path) {
        return RouteDecision::Allow;
    }

    if path == "/" {
        return if authenticated {
            RouteDecision::RedirectTo("/dashboard")
        } else {
            RouteDecision::RedirectTo("/login")
        };
    }

    if authenticated {
        RouteDecision::Allow
    } else {
        RouteDecision::RedirectTo("/login")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes_always_allowed() {
        for status in [
            SessionStatus::Anonymous,
            SessionStatus::Authenticating,
            SessionStatus::Authenticated,
            SessionStatus::Failed,
        ] {
            assert_eq!(decide("/login", status), RouteDecision::Allow);
            assert_eq!(decide("/register", status), RouteDecision::Allow);
        }
    }

    #[test]
    fn protected_routes_redirect_anonymous_to_login() {
        assert_eq!(
            decide("/dashboard", SessionStatus::Anonymous),
            RouteDecision::RedirectTo("/login")
        );
        assert_eq!(
            decide("/loan-application", SessionStatus::Failed),
            RouteDecision::RedirectTo("/login")
        );
    }

    #[test]
    fn protected_routes_allowed_when_authenticated() {
        assert_eq!(
            decide("/dashboard", SessionStatus::Authenticated),
            RouteDecision::Allow
        );
        assert_eq!(
            decide("/loan-approval/42", SessionStatus::Authenticated),
            RouteDecision::Allow
        );
    }

    #[test]
    fn root_forwards_by_session() {
        assert_eq!(
            decide("/", SessionStatus::Authenticated),
            RouteDecision::RedirectTo("/dashboard")
        );
        assert_eq!(
            decide("/", SessionStatus::Anonymous),
            RouteDecision::RedirectTo("/login")
        );
    }

    #[test]
    fn decision_is_deterministic() {
        let first = decide("/dashboard", SessionStatus::Anonymous);
        let second = decide("/dashboard", SessionStatus::Anonymous);
        assert_eq!(first, second);
    }
}
