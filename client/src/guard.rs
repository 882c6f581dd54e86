use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Loading,
    Render,
    RedirectToLogin,
}

/// Gate for views that need an authenticated session.
pub fn guard(session: &Session) -> GuardDecision {
    if session.is_initializing() {
        GuardDecision::Loading
    } else if session.is_authenticated() {
        GuardDecision::Render
    } else {
        GuardDecision::RedirectToLogin
    }
}
