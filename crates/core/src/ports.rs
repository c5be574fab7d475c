//! Port interfaces for the REST API and the host application
//!
//! These traits define the boundaries between the synchronization logic in
//! this crate and the infrastructure that talks HTTP or renders views.

use std::sync::Arc;

use async_trait::async_trait;
use minutes_domain::{
    ActionItem, ActionItemPatch, CalendarEvent, Credentials, GoogleStatus, Meeting, MeetingPatch,
    NewActionItem, NewMeeting, Result, SignupForm, SummaryPayload, User,
};

use crate::navigation::Route;

/// Outcome of a conditional read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conditional<T> {
    /// The server answered 304: the caller's cached copy is still current.
    Unchanged,
    /// A full response; `body` is `None` when the server sent no usable body.
    Fresh { body: Option<T>, validator: Option<String> },
}

/// Typed view of the meetings REST API
#[async_trait]
pub trait MeetingsApi: Send + Sync {
    /// Identity probe (`GET /auth/me`); `None` when there is no session.
    async fn me(&self) -> Result<Option<User>>;

    async fn login(&self, credentials: &Credentials) -> Result<User>;

    async fn signup(&self, form: &SignupForm) -> Result<User>;

    async fn logout(&self) -> Result<()>;

    async fn list_meetings(&self) -> Result<Vec<Meeting>>;

    async fn create_meeting(&self, meeting: &NewMeeting) -> Result<Meeting>;

    async fn get_meeting(&self, id: i64) -> Result<Meeting>;

    async fn update_meeting(&self, id: i64, patch: &MeetingPatch) -> Result<Meeting>;

    async fn delete_meeting(&self, id: i64) -> Result<()>;

    /// Ask the server to (re)generate the meeting's summary.
    async fn summarize(&self, meeting_id: i64) -> Result<()>;

    /// Latest summary, conditional on `validator` when one is held.
    async fn get_summary(
        &self,
        meeting_id: i64,
        validator: Option<&str>,
    ) -> Result<Conditional<SummaryPayload>>;

    async fn list_action_items(&self, meeting_id: i64) -> Result<Vec<ActionItem>>;

    async fn create_action_item(&self, meeting_id: i64, item: &NewActionItem)
        -> Result<ActionItem>;

    async fn update_action_item(&self, id: i64, patch: &ActionItemPatch) -> Result<ActionItem>;

    async fn delete_action_item(&self, id: i64) -> Result<()>;

    async fn google_status(&self) -> Result<GoogleStatus>;

    async fn google_events(&self) -> Result<Vec<CalendarEvent>>;

    /// Forget the stored calendar credentials.
    async fn google_disconnect(&self) -> Result<()>;

    /// Absolute URL that starts the calendar OAuth flow (full-page redirect).
    fn google_login_url(&self) -> String;
}

/// Callback invoked when any request is answered with 401
pub type UnauthorizedHandler = Arc<dyn Fn() + Send + Sync>;

/// Single-subscriber unauthorized signal exposed by the request gateway
///
/// Registration is last-wins: setting a handler replaces the previous one.
pub trait UnauthorizedSignal: Send + Sync {
    fn set_unauthorized_handler(&self, handler: UnauthorizedHandler);

    fn clear_unauthorized_handler(&self);
}

/// Client-side navigation provided by the host application
pub trait Navigator: Send + Sync {
    fn current_route(&self) -> Route;

    fn navigate(&self, route: Route);
}
