//! Domain types and models
//!
//! Read-through copies of server-owned records plus the request bodies the
//! client sends. Records carry no client-side identity beyond the server id.

pub mod action_item;
pub mod calendar;
pub mod meeting;
pub mod summary;
pub mod user;

pub use action_item::{ActionItem, ActionItemPatch, ItemStatus, NewActionItem, Priority};
pub use calendar::{format_event_range, CalendarEvent, GoogleStatus};
pub use meeting::{Meeting, MeetingPatch, NewMeeting};
pub use summary::{DecodedSummary, SummaryPayload};
pub use user::{Credentials, SignupForm, User};
