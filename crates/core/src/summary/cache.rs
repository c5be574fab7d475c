//! Conditional summary cache
//!
//! One slot per meeting view. The slot holds the last summary body together
//! with the validator (ETag) that came with it, and replays the validator on
//! the next read so an unchanged summary costs a 304 instead of a body.

use minutes_domain::{DecodedSummary, Result, SummaryPayload};
use tracing::{debug, instrument, warn};

use crate::ports::{Conditional, MeetingsApi};

/// Cached summary for a single meeting
///
/// Invariant: a validator is only held together with the payload it was
/// issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCache {
    meeting_id: i64,
    payload: Option<SummaryPayload>,
    validator: Option<String>,
}

impl SummaryCache {
    pub fn new(meeting_id: i64) -> Self {
        Self { meeting_id, payload: None, validator: None }
    }

    pub fn meeting_id(&self) -> i64 {
        self.meeting_id
    }

    pub fn payload(&self) -> Option<&SummaryPayload> {
        self.payload.as_ref()
    }

    pub fn validator(&self) -> Option<&str> {
        self.validator.as_deref()
    }

    /// Read the latest summary, conditional on the held validator.
    ///
    /// A 304 leaves the slot untouched; a full response replaces payload and
    /// validator together. Errors leave the slot untouched.
    #[instrument(skip(self, api), fields(meeting_id = self.meeting_id))]
    pub async fn refresh(&mut self, api: &dyn MeetingsApi) -> Result<Option<&SummaryPayload>> {
        let response = api.get_summary(self.meeting_id, self.validator.as_deref()).await?;
        match response {
            Conditional::Unchanged => {
                debug!("summary unchanged");
            }
            Conditional::Fresh { body, validator } => {
                debug!(has_body = body.is_some(), "summary replaced");
                self.validator = body.as_ref().and(validator);
                self.payload = body;
            }
        }
        Ok(self.payload.as_ref())
    }

    /// Forget the validator so the next [`Self::refresh`] is unconditional.
    /// The current payload stays visible until that refresh succeeds.
    pub fn invalidate(&mut self) {
        self.validator = None;
    }

    /// Render-ready summary with per-field fallbacks.
    pub fn decoded(&self) -> Option<DecodedSummary> {
        let payload = self.payload.as_ref()?;
        for error in payload.decode_errors() {
            warn!(meeting_id = self.meeting_id, error = %error, "summary field degraded to empty");
        }
        Some(payload.decode())
    }
}
