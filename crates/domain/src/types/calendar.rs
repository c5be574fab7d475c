//! External calendar types
//!
//! Shapes returned by the `/google/*` endpoints plus the time-range label
//! used when listing importable events.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Upcoming event from the connected calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    /// RFC 3339 date-time, or `YYYY-MM-DD` for all-day events
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub html_link: Option<String>,
}

impl CalendarEvent {
    /// Non-blank title, if the event has one.
    pub fn title(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn time_range_label(&self) -> String {
        format_event_range(self.start.as_deref(), self.end.as_deref())
    }
}

/// Calendar connection state from `GET /google/status`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleStatus {
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub has_calendar: bool,
}

enum EventTime {
    AllDay(NaiveDate),
    At(DateTime<Local>),
}

impl EventTime {
    fn parse(raw: &str) -> Option<Self> {
        if raw.len() <= 10 {
            return NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().map(Self::AllDay);
        }
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self::At(at.with_timezone(&Local)));
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()?;
        Local.from_local_datetime(&naive).earliest().map(Self::At)
    }

    fn label(&self, mark_all_day: bool) -> String {
        match self {
            Self::AllDay(date) if mark_all_day => format!("{} (all-day)", date.format("%Y-%m-%d")),
            Self::AllDay(date) => date.format("%Y-%m-%d").to_string(),
            Self::At(at) => at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Human-readable range for an event's start/end.
///
/// Date-only values are treated as all-day (the start is marked
/// `(all-day)`), date-times are shown in local time. If either side cannot be
/// parsed the raw start string is returned unchanged.
pub fn format_event_range(start: Option<&str>, end: Option<&str>) -> String {
    let start = start.filter(|s| !s.is_empty());
    let end = end.filter(|s| !s.is_empty());
    if start.is_none() && end.is_none() {
        return String::new();
    }

    let parsed_start = start.map(EventTime::parse);
    let parsed_end = end.map(EventTime::parse);
    if matches!(parsed_start, Some(None)) || matches!(parsed_end, Some(None)) {
        return start.unwrap_or_default().to_string();
    }

    let start_label = parsed_start.flatten().map(|t| t.label(true));
    let end_label = parsed_end.flatten().map(|t| t.label(false));

    match (start_label, end_label) {
        (Some(start), Some(end)) => format!("{start} → {end}"),
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => String::new(),
    }
}
