//! Calendar import panel
//!
//! Tracks the external calendar connection and lists upcoming events that can
//! be imported as meetings. Failures here never propagate: the panel degrades
//! to "not connected" or an empty list and reports through [`Notice`].

use std::sync::Arc;

use minutes_domain::constants::MISSING_CALENDAR_SCOPE;
use minutes_domain::{CalendarEvent, Result};
use tracing::{debug, instrument, warn};

use super::{Notice, Severity};
use crate::ports::MeetingsApi;

const MISSING_SCOPE_MESSAGE: &str =
    "Calendar permission wasn't granted. Click \"Re-connect Google\" and check the box.";
const CONNECTED_WITHOUT_SCOPE_MESSAGE: &str = "Google is connected, but calendar permission \
     wasn't granted. Click \"Re-connect Google\" and check the box.";
const EVENTS_FAILED_MESSAGE: &str = "Failed to load Google events";
const CONNECTION_FAILED_MESSAGE: &str = "Google connection failed. Please try again.";

/// Connection indicator shown next to the meetings list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarBadge {
    Checking,
    NotConnected,
    MissingPermission,
    Connected,
}

pub struct CalendarPanel {
    api: Arc<dyn MeetingsApi>,
    status_loading: bool,
    connected: bool,
    has_calendar: bool,
    events_loading: bool,
    events: Vec<CalendarEvent>,
    notice: Option<Notice>,
}

impl CalendarPanel {
    pub fn new(api: Arc<dyn MeetingsApi>) -> Self {
        Self {
            api,
            status_loading: true,
            connected: false,
            has_calendar: false,
            events_loading: false,
            events: Vec::new(),
            notice: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn has_calendar(&self) -> bool {
        self.has_calendar
    }

    pub fn is_status_loading(&self) -> bool {
        self.status_loading
    }

    pub fn is_events_loading(&self) -> bool {
        self.events_loading
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn badge(&self) -> CalendarBadge {
        match (self.status_loading, self.connected, self.has_calendar) {
            (true, _, _) => CalendarBadge::Checking,
            (false, false, _) => CalendarBadge::NotConnected,
            (false, true, false) => CalendarBadge::MissingPermission,
            (false, true, true) => CalendarBadge::Connected,
        }
    }

    /// URL the host should open (full-page) to start the OAuth flow.
    pub fn connect_url(&self) -> String {
        self.api.google_login_url()
    }

    /// Re-read the connection state. Any failure reads as disconnected.
    #[instrument(skip(self))]
    pub async fn check_status(&mut self) {
        self.status_loading = true;
        match self.api.google_status().await {
            Ok(status) => {
                self.connected = status.connected;
                self.has_calendar = status.has_calendar;
                if status.connected && !status.has_calendar {
                    self.notice = Some(Notice::new(Severity::Warning, CONNECTED_WITHOUT_SCOPE_MESSAGE));
                }
            }
            Err(err) => {
                debug!(error = %err, "calendar status unavailable");
                self.connected = false;
                self.has_calendar = false;
            }
        }
        self.status_loading = false;
    }

    /// Fetch upcoming events. Does nothing unless connected with calendar
    /// permission.
    #[instrument(skip(self))]
    pub async fn load_events(&mut self) {
        if !(self.connected && self.has_calendar) {
            return;
        }
        self.events_loading = true;
        match self.api.google_events().await {
            Ok(events) => self.events = events,
            Err(err) if err.is_missing_calendar_scope() => {
                self.notice = Some(Notice::new(Severity::Warning, MISSING_SCOPE_MESSAGE));
                self.events.clear();
            }
            Err(err) => {
                warn!(error = %err, "failed to load calendar events");
                self.notice = Some(Notice::new(Severity::Error, EVENTS_FAILED_MESSAGE));
                self.events.clear();
            }
        }
        self.events_loading = false;
    }

    /// Status check followed by an event load, or an emptied list when the
    /// connection cannot serve events.
    pub async fn refresh(&mut self) {
        self.check_status().await;
        if self.connected && self.has_calendar {
            self.load_events().await;
        } else {
            self.events.clear();
        }
    }

    /// Drop the calendar connection, then re-read its state.
    #[instrument(skip(self))]
    pub async fn disconnect(&mut self) -> Result<()> {
        self.api.google_disconnect().await?;
        self.refresh().await;
        Ok(())
    }

    /// Interpret the query string the OAuth callback redirected back with
    /// and surface it as the panel's notice. Returns the notice when the
    /// query carried a `google_error`.
    pub fn apply_callback(&mut self, query: &str) -> Option<&Notice> {
        self.notice = Some(callback_notice(query)?);
        self.notice.as_ref()
    }
}

/// Notice for a `?google_error=...&help=...` callback query. `help`, when
/// present, replaces the default message.
pub fn callback_notice(query: &str) -> Option<Notice> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut google_error = None;
    let mut help = None;
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "google_error" => google_error = Some(value.into_owned()),
            "help" => help = Some(value.into_owned()),
            _ => {}
        }
    }

    let google_error = google_error.filter(|e| !e.is_empty())?;
    let missing_scope = google_error == MISSING_CALENDAR_SCOPE;
    let severity = if missing_scope { Severity::Warning } else { Severity::Error };

    // The server percent-encodes `help` inside an already encoded query.
    let help = help
        .filter(|h| !h.is_empty())
        .map(|h| urlencoding::decode(&h).map(|d| d.into_owned()).unwrap_or(h));

    let fallback = if missing_scope { MISSING_SCOPE_MESSAGE } else { CONNECTION_FAILED_MESSAGE };
    let message = help.unwrap_or_else(|| fallback.to_string());
    Some(Notice::new(severity, message))
}
