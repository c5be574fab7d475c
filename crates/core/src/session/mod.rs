//! Authentication session state and route guarding

pub mod guard;
pub mod store;

pub use guard::{guard, should_leave_auth_view, Access};
pub use store::{Session, SessionState, SessionStore};
