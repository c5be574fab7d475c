//! Meeting detail view model: notes, summary and action items

use std::sync::Arc;

use minutes_domain::constants::MEETING_FALLBACK_TITLE;
use minutes_domain::{
    ActionItem, ActionItemPatch, DecodedSummary, ItemStatus, Meeting, MeetingPatch, NewActionItem,
    Priority, Result,
};
use tracing::{instrument, warn};

use crate::ports::MeetingsApi;
use crate::summary::SummaryCache;

/// State behind the single-meeting screen
pub struct MeetingDetail {
    api: Arc<dyn MeetingsApi>,
    meeting_id: i64,
    meeting: Option<Meeting>,
    notes: String,
    saving: bool,
    items: Vec<ActionItem>,
    summary: SummaryCache,
    error: Option<String>,
}

impl MeetingDetail {
    pub fn new(api: Arc<dyn MeetingsApi>, meeting_id: i64) -> Self {
        Self {
            api,
            meeting_id,
            meeting: None,
            notes: String::new(),
            saving: false,
            items: Vec::new(),
            summary: SummaryCache::new(meeting_id),
            error: None,
        }
    }

    pub fn meeting_id(&self) -> i64 {
        self.meeting_id
    }

    pub fn meeting(&self) -> Option<&Meeting> {
        self.meeting.as_ref()
    }

    pub fn title(&self) -> &str {
        self.meeting
            .as_ref()
            .map(|m| m.title.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(MEETING_FALLBACK_TITLE)
    }

    /// Notes draft as edited by the user.
    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn items(&self) -> &[ActionItem] {
        &self.items
    }

    pub fn summary(&self) -> &SummaryCache {
        &self.summary
    }

    pub fn decoded_summary(&self) -> Option<DecodedSummary> {
        self.summary.decoded()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Summarizing needs non-blank notes.
    pub fn can_summarize(&self) -> bool {
        !self.notes.trim().is_empty()
    }

    /// Fetch the meeting and its action items. The summary is only loaded on
    /// demand through [`Self::load_summary`].
    #[instrument(skip(self), fields(meeting_id = self.meeting_id))]
    pub async fn load(&mut self) -> Result<()> {
        self.error = None;
        let (meeting, items) = tokio::join!(
            self.api.get_meeting(self.meeting_id),
            self.api.list_action_items(self.meeting_id)
        );

        let meeting_result = meeting.map(|meeting| self.apply_meeting(meeting));
        let items_result = items.map(|items| self.items = items);
        meeting_result.and(items_result)
    }

    /// Persist the notes draft, then re-read the meeting. Failures are also
    /// recorded in [`Self::error`].
    #[instrument(skip(self), fields(meeting_id = self.meeting_id))]
    pub async fn save_notes(&mut self) -> Result<()> {
        self.saving = true;
        let outcome = self.persist_notes().await;
        self.saving = false;
        self.record_failure(outcome)
    }

    /// Request a fresh summary and show it.
    ///
    /// The held validator is dropped first so the follow-up read is
    /// unconditional; the previous summary stays visible until it returns.
    #[instrument(skip(self), fields(meeting_id = self.meeting_id))]
    pub async fn summarize(&mut self) -> Result<()> {
        self.error = None;
        let outcome = self.regenerate_summary().await;
        self.record_failure(outcome)
    }

    /// Re-read the summary through the conditional cache.
    pub async fn load_summary(&mut self) -> Result<()> {
        self.summary.refresh(&*self.api).await.map(|_| ())
    }

    /// Add an open, medium-priority item and reload the list. Blank
    /// descriptions are ignored and return `Ok(None)`.
    #[instrument(skip(self), fields(meeting_id = self.meeting_id))]
    pub async fn add_item(&mut self, description: &str) -> Result<Option<ActionItem>> {
        let description = description.trim();
        if description.is_empty() {
            return Ok(None);
        }
        let new = NewActionItem::new(description, Priority::Medium, ItemStatus::Open);
        let created = self.api.create_action_item(self.meeting_id, &new).await?;
        self.reload_items().await?;
        Ok(Some(created))
    }

    /// Flip an item between done and open, then reload the list.
    #[instrument(skip(self, item), fields(item_id = item.id))]
    pub async fn toggle_done(&mut self, item: &ActionItem) -> Result<()> {
        let patch = ActionItemPatch::status(item.toggled_status());
        self.api.update_action_item(item.id, &patch).await?;
        self.reload_items().await
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&mut self, item_id: i64) -> Result<()> {
        self.api.delete_action_item(item_id).await?;
        self.reload_items().await
    }

    async fn persist_notes(&mut self) -> Result<()> {
        let patch = MeetingPatch::notes(self.notes.clone());
        self.api.update_meeting(self.meeting_id, &patch).await?;
        let meeting = self.api.get_meeting(self.meeting_id).await?;
        self.apply_meeting(meeting);
        Ok(())
    }

    async fn regenerate_summary(&mut self) -> Result<()> {
        self.api.summarize(self.meeting_id).await?;
        self.summary.invalidate();
        self.load_summary().await
    }

    async fn reload_items(&mut self) -> Result<()> {
        self.items = self.api.list_action_items(self.meeting_id).await?;
        Ok(())
    }

    fn apply_meeting(&mut self, meeting: Meeting) {
        self.notes = meeting.notes().to_string();
        self.meeting = Some(meeting);
    }

    fn record_failure(&mut self, outcome: Result<()>) -> Result<()> {
        if let Err(err) = &outcome {
            warn!(meeting_id = self.meeting_id, error = %err, "meeting action failed");
            self.error = Some(err.to_string());
        }
        outcome
    }
}
