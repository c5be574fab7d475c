//! Meeting records and request bodies

use serde::{Deserialize, Serialize};

use super::action_item::ActionItem;
use super::summary::SummaryPayload;

/// Server-owned meeting record
///
/// `summaries` and `action_items` are only populated by the single-meeting
/// read (`GET /meetings/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: i64,
    #[serde(default)]
    pub creator_id: Option<i64>,
    pub title: String,
    /// ISO-8601 date-time, if scheduled
    #[serde(default)]
    pub meeting_date: Option<String>,
    /// JSON-encoded attendee list, stored verbatim by the server
    #[serde(default)]
    pub attendees_json: Option<String>,
    #[serde(default)]
    pub raw_notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summaries: Option<Vec<SummaryPayload>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_items: Option<Vec<ActionItem>>,
}

impl Meeting {
    /// Notes text, empty when the meeting has none yet.
    pub fn notes(&self) -> &str {
        self.raw_notes.as_deref().unwrap_or_default()
    }
}

/// Body of `POST /meetings`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMeeting {
    pub title: String,
    pub raw_notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_date: Option<String>,
}

impl NewMeeting {
    pub fn new(title: impl Into<String>, raw_notes: impl Into<String>) -> Self {
        Self { title: title.into(), raw_notes: raw_notes.into(), meeting_date: None }
    }

    pub fn with_meeting_date(mut self, meeting_date: impl Into<String>) -> Self {
        self.meeting_date = Some(meeting_date.into());
        self
    }
}

/// Body of `PATCH /meetings/{id}`
///
/// Only fields that are `Some` are sent. `meeting_date: Some(None)` clears the
/// date on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_date: Option<Option<String>>,
}

impl MeetingPatch {
    pub fn notes(raw_notes: impl Into<String>) -> Self {
        Self { raw_notes: Some(raw_notes.into()), ..Self::default() }
    }
}
