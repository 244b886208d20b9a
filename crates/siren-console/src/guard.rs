//! Route guard for the protected dashboard view.

/// The view the shell should present next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
}

/// Decide which view may render.
///
/// A pure function of the current authentication state, re-evaluated on
/// every shell iteration: a logout redirects to the login view at the very
/// next prompt, with no grace period and no cached prior state.
pub fn route(authenticated: bool) -> View {
    if authenticated {
        View::Dashboard
    } else {
        View::Login
    }
}
