//! Meetings list view model

use std::sync::Arc;

use minutes_domain::constants::IMPORTED_EVENT_FALLBACK_TITLE;
use minutes_domain::{CalendarEvent, Meeting, NewMeeting, Result};
use tracing::{debug, instrument};

use super::{Notice, Severity};
use crate::ports::MeetingsApi;

/// State behind the meetings list screen
pub struct MeetingsBoard {
    api: Arc<dyn MeetingsApi>,
    meetings: Vec<Meeting>,
    loading: bool,
    notice: Option<Notice>,
}

impl MeetingsBoard {
    pub fn new(api: Arc<dyn MeetingsApi>) -> Self {
        Self { api, meetings: Vec::new(), loading: true, notice: None }
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Re-fetch the full meetings collection.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<()> {
        self.loading = true;
        let fetched = self.api.list_meetings().await;
        self.loading = false;

        self.meetings = fetched?;
        debug!(count = self.meetings.len(), "meetings loaded");
        Ok(())
    }

    /// Create a meeting and reload the list. A blank title is ignored and
    /// returns `Ok(None)` without calling the server.
    #[instrument(skip(self, raw_notes))]
    pub async fn create(&mut self, title: &str, raw_notes: &str) -> Result<Option<Meeting>> {
        if title.trim().is_empty() {
            return Ok(None);
        }
        let created = self.api.create_meeting(&NewMeeting::new(title, raw_notes)).await?;
        self.notice = Some(Notice::new(Severity::Success, "Meeting created"));
        self.load().await?;
        Ok(Some(created))
    }

    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        self.api.delete_meeting(id).await?;
        self.notice = Some(Notice::new(Severity::Info, "Meeting deleted"));
        self.load().await
    }

    /// Create a meeting from a calendar event and reload the list.
    #[instrument(skip(self, event), fields(event_id = %event.id))]
    pub async fn import_event(&mut self, event: &CalendarEvent) -> Result<Meeting> {
        let title = event.title().unwrap_or(IMPORTED_EVENT_FALLBACK_TITLE).to_string();
        let mut new = NewMeeting::new(title.clone(), "");
        if let Some(start) = event.start.as_deref().filter(|s| !s.is_empty()) {
            new = new.with_meeting_date(start);
        }

        let created = self.api.create_meeting(&new).await?;
        self.notice = Some(Notice::new(Severity::Success, format!("Imported \"{title}\"")));
        self.load().await?;
        Ok(created)
    }
}
