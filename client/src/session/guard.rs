//! Access gate for protected screens.
//!
//! A pure predicate over the session state; the shell routes on the
//! returned decision.

use crate::session::models::SessionState;

/// What the router should do with a request for a protected screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session is live; render the requested screen.
    Render,
    /// No session; send the user to the login screen.
    RedirectToLogin,
    /// Startup check still running; render a neutral loading state.
    Loading,
}

/// Decide whether a protected screen may render.
///
/// `Checking` maps to `Loading` so protected content never flashes before
/// the startup token check resolves.
pub fn evaluate(state: &SessionState) -> RouteDecision {
    match state {
        SessionState::Checking => RouteDecision::Loading,
        SessionState::Unauthenticated => RouteDecision::RedirectToLogin,
        SessionState::Authenticated(_) => RouteDecision::Render,
    }
}
