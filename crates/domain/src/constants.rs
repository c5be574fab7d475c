//! Client constants
//!
//! Centralized location for wire-level and configuration defaults.

// Configuration defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Conditional requests
pub const IF_NONE_MATCH_HEADER: &str = "If-None-Match";
pub const ETAG_HEADER: &str = "ETag";

// Server error codes with dedicated handling
pub const MISSING_CALENDAR_SCOPE: &str = "missing_calendar_scope";

// Fallback titles
pub const IMPORTED_EVENT_FALLBACK_TITLE: &str = "Calendar event";
pub const MEETING_FALLBACK_TITLE: &str = "Meeting";
