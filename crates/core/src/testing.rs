//! In-memory fakes of the ports for unit tests
//!
//! `FakeApi` behaves like a tiny meetings server: collections persist across
//! calls, protected endpoints answer 401 (and fire the registered
//! unauthorized handler) when there is no session, and individual endpoints
//! can be made to fail once.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use minutes_domain::{
    ActionItem, ActionItemPatch, CalendarEvent, Credentials, GoogleStatus, Meeting, MeetingPatch,
    MinutesError, NewActionItem, NewMeeting, Result, SignupForm, SummaryPayload, User,
};
use parking_lot::Mutex;

use crate::navigation::Route;
use crate::ports::{Conditional, MeetingsApi, Navigator, UnauthorizedHandler, UnauthorizedSignal};

pub fn demo_user() -> User {
    User { id: 1, email: "pm@demo.com".into(), name: "PM".into() }
}

pub fn summary_payload(bullets: &str) -> SummaryPayload {
    SummaryPayload {
        id: Some(1),
        meeting_id: Some(1),
        bullets_json: Some(bullets.to_string()),
        decisions_json: Some("[]".into()),
        model_metadata: Some(r#"{"model": "stub"}"#.into()),
        created_at: None,
        updated_at: None,
    }
}

#[derive(Default)]
struct FakeState {
    session: Option<User>,
    accounts: Vec<(Credentials, User)>,
    meetings: Vec<Meeting>,
    items: Vec<ActionItem>,
    summaries: HashMap<i64, (SummaryPayload, String)>,
    google_status: GoogleStatus,
    google_events: Vec<CalendarEvent>,
    next_id: i64,
    failures: HashMap<&'static str, MinutesError>,
    calls: Vec<String>,
}

/// In-memory meetings server
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
    handler: Mutex<Option<UnauthorizedHandler>>,
    unauthorized_fired: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn signed_in(user: User) -> Arc<Self> {
        let api = Self::default();
        api.state.lock().session = Some(user);
        Arc::new(api)
    }

    pub fn add_account(&self, credentials: Credentials, user: User) {
        self.state.lock().accounts.push((credentials, user));
    }

    pub fn end_session(&self) {
        self.state.lock().session = None;
    }

    pub fn has_session(&self) -> bool {
        self.state.lock().session.is_some()
    }

    /// Make the next call to `endpoint` fail with `error`.
    pub fn fail_next(&self, endpoint: &'static str, error: MinutesError) {
        self.state.lock().failures.insert(endpoint, error);
    }

    pub fn seed_meeting(&self, title: &str, raw_notes: Option<&str>) -> i64 {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.meetings.push(meeting(id, title, raw_notes.map(str::to_string), None));
        id
    }

    pub fn seed_item(&self, meeting_id: i64, description: &str, status: &str) -> ActionItem {
        let mut state = self.state.lock();
        state.next_id += 1;
        let item = action_item(state.next_id, meeting_id, description, status);
        state.items.push(item.clone());
        item
    }

    pub fn set_summary(&self, meeting_id: i64, payload: SummaryPayload, etag: &str) {
        self.state.lock().summaries.insert(meeting_id, (payload, etag.to_string()));
    }

    pub fn set_google(&self, status: GoogleStatus, events: Vec<CalendarEvent>) {
        let mut state = self.state.lock();
        state.google_status = status;
        state.google_events = events;
    }

    pub fn meetings(&self) -> Vec<Meeting> {
        self.state.lock().meetings.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    pub fn unauthorized_count(&self) -> usize {
        self.unauthorized_fired.load(Ordering::SeqCst)
    }

    /// Record the call, apply any scripted failure and enforce the session
    /// for protected endpoints.
    fn enter(&self, endpoint: &'static str, protected: bool) -> Result<()> {
        let outcome = {
            let mut state = self.state.lock();
            state.calls.push(endpoint.to_string());
            if let Some(error) = state.failures.remove(endpoint) {
                Err(error)
            } else if protected && state.session.is_none() {
                Err(MinutesError::unauthorized(None))
            } else {
                Ok(())
            }
        };
        if matches!(outcome, Err(ref err) if err.is_unauthorized()) {
            self.fire_unauthorized();
        }
        outcome
    }

    fn fire_unauthorized(&self) {
        self.unauthorized_fired.fetch_add(1, Ordering::SeqCst);
        let handler = self.handler.lock().clone();
        if let Some(handler) = handler {
            handler();
        }
    }
}

fn meeting(id: i64, title: &str, raw_notes: Option<String>, date: Option<String>) -> Meeting {
    Meeting {
        id,
        creator_id: Some(1),
        title: title.to_string(),
        meeting_date: date,
        attendees_json: None,
        raw_notes,
        created_at: None,
        updated_at: None,
        summaries: None,
        action_items: None,
    }
}

fn action_item(id: i64, meeting_id: i64, description: &str, status: &str) -> ActionItem {
    ActionItem {
        id,
        meeting_id,
        assignee_id: None,
        description: description.to_string(),
        priority: Some("medium".into()),
        due_date: None,
        status: Some(status.to_string()),
        created_at: None,
        updated_at: None,
    }
}

fn not_found() -> MinutesError {
    MinutesError::api(404, "not found")
}

#[async_trait]
impl MeetingsApi for FakeApi {
    async fn me(&self) -> Result<Option<User>> {
        self.enter("me", true)?;
        Ok(self.state.lock().session.clone())
    }

    async fn login(&self, credentials: &Credentials) -> Result<User> {
        self.enter("login", false)?;
        let user = {
            let mut state = self.state.lock();
            let user = state
                .accounts
                .iter()
                .find(|(known, _)| known == credentials)
                .map(|(_, user)| user.clone());
            if let Some(user) = &user {
                state.session = Some(user.clone());
            }
            user
        };
        match user {
            Some(user) => Ok(user),
            None => {
                self.fire_unauthorized();
                Err(MinutesError::unauthorized(Some("invalid credentials".into())))
            }
        }
    }

    async fn signup(&self, form: &SignupForm) -> Result<User> {
        self.enter("signup", false)?;
        let mut state = self.state.lock();
        if state.accounts.iter().any(|(known, _)| known.email == form.email) {
            return Err(MinutesError::api(409, "email already in use"));
        }
        state.next_id += 1;
        let user = User { id: state.next_id, email: form.email.clone(), name: form.name.clone() };
        state
            .accounts
            .push((Credentials::new(form.email.clone(), form.password.clone()), user.clone()));
        state.session = Some(user.clone());
        Ok(user)
    }

    async fn logout(&self) -> Result<()> {
        self.enter("logout", false)?;
        self.state.lock().session = None;
        Ok(())
    }

    async fn list_meetings(&self) -> Result<Vec<Meeting>> {
        self.enter("list_meetings", true)?;
        Ok(self.state.lock().meetings.clone())
    }

    async fn create_meeting(&self, new: &NewMeeting) -> Result<Meeting> {
        self.enter("create_meeting", true)?;
        if new.title.trim().is_empty() {
            return Err(MinutesError::api(400, "title required"));
        }
        let mut state = self.state.lock();
        state.next_id += 1;
        let created = meeting(
            state.next_id,
            new.title.trim(),
            Some(new.raw_notes.clone()),
            new.meeting_date.clone(),
        );
        state.meetings.push(created.clone());
        Ok(created)
    }

    async fn get_meeting(&self, id: i64) -> Result<Meeting> {
        self.enter("get_meeting", true)?;
        self.state.lock().meetings.iter().find(|m| m.id == id).cloned().ok_or_else(not_found)
    }

    async fn update_meeting(&self, id: i64, patch: &MeetingPatch) -> Result<Meeting> {
        self.enter("update_meeting", true)?;
        let mut state = self.state.lock();
        let meeting = state.meetings.iter_mut().find(|m| m.id == id).ok_or_else(not_found)?;
        if let Some(title) = &patch.title {
            meeting.title = title.trim().to_string();
        }
        if let Some(notes) = &patch.raw_notes {
            meeting.raw_notes = Some(notes.clone());
        }
        if let Some(date) = &patch.meeting_date {
            meeting.meeting_date = date.clone();
        }
        Ok(meeting.clone())
    }

    async fn delete_meeting(&self, id: i64) -> Result<()> {
        self.enter("delete_meeting", true)?;
        let mut state = self.state.lock();
        let before = state.meetings.len();
        state.meetings.retain(|m| m.id != id);
        if state.meetings.len() == before {
            return Err(not_found());
        }
        state.items.retain(|item| item.meeting_id != id);
        Ok(())
    }

    async fn summarize(&self, meeting_id: i64) -> Result<()> {
        self.enter("summarize", true)?;
        let mut state = self.state.lock();
        let notes = state
            .meetings
            .iter()
            .find(|m| m.id == meeting_id)
            .ok_or_else(not_found)?
            .notes()
            .to_string();
        if notes.is_empty() {
            return Err(MinutesError::api(
                400,
                "meeting must have title and raw_notes to summarize",
            ));
        }
        state.next_id += 1;
        let etag = format!("etag-{}", state.next_id);
        let bullets = serde_json::to_string(&vec![notes]).unwrap_or_default();
        state.summaries.insert(meeting_id, (summary_payload(&bullets), etag));
        Ok(())
    }

    async fn get_summary(
        &self,
        meeting_id: i64,
        validator: Option<&str>,
    ) -> Result<Conditional<SummaryPayload>> {
        self.enter("get_summary", true)?;
        let state = self.state.lock();
        let (payload, etag) =
            state.summaries.get(&meeting_id).ok_or_else(|| MinutesError::api(404, "no summary"))?;
        if validator == Some(etag.as_str()) {
            return Ok(Conditional::Unchanged);
        }
        Ok(Conditional::Fresh { body: Some(payload.clone()), validator: Some(etag.clone()) })
    }

    async fn list_action_items(&self, meeting_id: i64) -> Result<Vec<ActionItem>> {
        self.enter("list_action_items", true)?;
        let state = self.state.lock();
        Ok(state.items.iter().filter(|item| item.meeting_id == meeting_id).cloned().collect())
    }

    async fn create_action_item(&self, meeting_id: i64, new: &NewActionItem) -> Result<ActionItem> {
        self.enter("create_action_item", true)?;
        if new.description.trim().is_empty() {
            return Err(MinutesError::api(400, "description required"));
        }
        let mut state = self.state.lock();
        state.next_id += 1;
        let mut item = action_item(state.next_id, meeting_id, new.description.trim(), &new.status);
        item.priority = Some(new.priority.clone());
        state.items.push(item.clone());
        Ok(item)
    }

    async fn update_action_item(&self, id: i64, patch: &ActionItemPatch) -> Result<ActionItem> {
        self.enter("update_action_item", true)?;
        let mut state = self.state.lock();
        let item = state.items.iter_mut().find(|item| item.id == id).ok_or_else(not_found)?;
        if let Some(status) = &patch.status {
            item.status = Some(status.clone());
        }
        if let Some(description) = &patch.description {
            item.description = description.trim().to_string();
        }
        if let Some(priority) = &patch.priority {
            item.priority = Some(priority.clone());
        }
        Ok(item.clone())
    }

    async fn delete_action_item(&self, id: i64) -> Result<()> {
        self.enter("delete_action_item", true)?;
        self.state.lock().items.retain(|item| item.id != id);
        Ok(())
    }

    async fn google_status(&self) -> Result<GoogleStatus> {
        self.enter("google_status", true)?;
        Ok(self.state.lock().google_status)
    }

    async fn google_events(&self) -> Result<Vec<CalendarEvent>> {
        self.enter("google_events", true)?;
        Ok(self.state.lock().google_events.clone())
    }

    async fn google_disconnect(&self) -> Result<()> {
        self.enter("google_disconnect", true)?;
        self.state.lock().google_status = GoogleStatus::default();
        Ok(())
    }

    fn google_login_url(&self) -> String {
        "http://localhost:5000/google/login".to_string()
    }
}

impl UnauthorizedSignal for FakeApi {
    fn set_unauthorized_handler(&self, handler: UnauthorizedHandler) {
        *self.handler.lock() = Some(handler);
    }

    fn clear_unauthorized_handler(&self) {
        *self.handler.lock() = None;
    }
}

/// Navigator that records every navigation
pub struct FakeNavigator {
    current: Mutex<Route>,
    history: Mutex<Vec<Route>>,
}

impl FakeNavigator {
    pub fn at(route: Route) -> Arc<Self> {
        Arc::new(Self { current: Mutex::new(route), history: Mutex::new(Vec::new()) })
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.lock().clone()
    }
}

impl Navigator for FakeNavigator {
    fn current_route(&self) -> Route {
        *self.current.lock()
    }

    fn navigate(&self, route: Route) {
        *self.current.lock() = route;
        self.history.lock().push(route);
    }
}
