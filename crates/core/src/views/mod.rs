//! Framework-independent view models
//!
//! Each view model owns the state one screen renders and the operations that
//! screen triggers. Every mutation of a collection is followed, in the same
//! operation, by a full re-fetch of that collection once the mutation has
//! been answered; lists are never patched locally.

pub mod calendar;
pub mod detail;
pub mod meetings;

pub use calendar::{callback_notice, CalendarBadge, CalendarPanel};
pub use detail::MeetingDetail;
pub use meetings::MeetingsBoard;

/// Transient message shown to the user (toast/snackbar)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self { severity, message: message.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}
