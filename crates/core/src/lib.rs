//! # Minutes Core
//!
//! Client-side synchronization logic, free of any HTTP or UI code.
//!
//! This crate contains:
//! - Port interfaces for the REST API, the unauthorized signal and navigation
//! - The session store and route guard
//! - The conditional summary cache
//! - View models for the meetings list, meeting detail and calendar panel
//!
//! ## Architecture Principles
//! - Only depends on `minutes-domain`
//! - All I/O goes through the traits in [`ports`]
//! - Lists are re-fetched after every mutation, never patched locally

pub mod navigation;
pub mod ports;
pub mod session;
pub mod summary;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use navigation::Route;
pub use ports::{Conditional, MeetingsApi, Navigator, UnauthorizedHandler, UnauthorizedSignal};
pub use session::{guard, should_leave_auth_view, Access, Session, SessionState, SessionStore};
pub use summary::SummaryCache;
pub use views::{
    callback_notice, CalendarBadge, CalendarPanel, MeetingDetail, MeetingsBoard, Notice, Severity,
};
