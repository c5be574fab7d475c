//! Route guard for protected views

use minutes_domain::User;

use super::store::Session;

/// What a view should do given the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Boot probe still running; show a loading state.
    Loading,
    RedirectToLogin,
    Allow(User),
}

/// Decide whether a protected view may render.
pub fn guard(session: &Session) -> Access {
    if !session.boot_completed {
        return Access::Loading;
    }
    match &session.identity {
        Some(user) => Access::Allow(user.clone()),
        None => Access::RedirectToLogin,
    }
}

/// Login and signup views send an authenticated user home.
pub fn should_leave_auth_view(session: &Session) -> bool {
    session.identity.is_some()
}
