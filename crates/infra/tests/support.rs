//! Shared helpers for the HTTP integration tests.

use std::sync::{Arc, Mutex};

use minutes_core::{Navigator, Route};
use serde_json::{json, Value};

/// Navigator that records every navigation request.
pub struct RecordingNavigator {
    current: Mutex<Route>,
    history: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn at(route: Route) -> Arc<Self> {
        Arc::new(Self { current: Mutex::new(route), history: Mutex::new(Vec::new()) })
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.lock().expect("history lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_route(&self) -> Route {
        *self.current.lock().expect("route lock")
    }

    fn navigate(&self, route: Route) {
        *self.current.lock().expect("route lock") = route;
        self.history.lock().expect("history lock").push(route);
    }
}

pub fn user_json() -> Value {
    json!({"id": 1, "email": "pm@demo.com", "name": "PM"})
}

pub fn meeting_json(id: i64, title: &str, raw_notes: &str) -> Value {
    json!({
        "id": id,
        "creator_id": 1,
        "title": title,
        "meeting_date": null,
        "attendees_json": null,
        "raw_notes": raw_notes,
        "created_at": "2025-01-01T10:00:00",
        "updated_at": "2025-01-01T10:00:00"
    })
}

pub fn summary_json(bullets: &str, decisions: &str) -> Value {
    json!({
        "id": 1,
        "meeting_id": 1,
        "bullets_json": bullets,
        "decisions_json": decisions,
        "model_metadata": "{\"model\": \"gpt-4o-mini\", \"usage\": {\"total_tokens\": 321}}",
        "created_at": "2025-01-01T10:00:00",
        "updated_at": "2025-01-01T10:00:00"
    })
}
