//! Typed client for the meetings REST API
//!
//! Maps every endpoint onto [`MeetingsApi`] on top of the [`Gateway`]. Error
//! bodies are already turned into errors by the gateway; this layer decodes
//! successful bodies and rejects any other unexpected status.

use std::sync::Arc;

use async_trait::async_trait;
use minutes_core::{Conditional, MeetingsApi, UnauthorizedHandler, UnauthorizedSignal};
use minutes_domain::{
    ActionItem, ActionItemPatch, CalendarEvent, ClientConfig, Credentials, GoogleStatus, Meeting,
    MeetingPatch, MinutesError, NewActionItem, NewMeeting, Result, SignupForm, SummaryPayload,
    User,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::errors::InfraError;
use crate::http::{Gateway, GatewayResponse, RequestOptions};

/// REST implementation of [`MeetingsApi`]
///
/// Cheap to clone; clones share the gateway, its cookie jar and its
/// unauthorized handler.
#[derive(Clone)]
pub struct ApiClient {
    gateway: Arc<Gateway>,
}

impl ApiClient {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Build the full HTTP stack from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(Gateway::from_config(config)?)))
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    async fn call(&self, path: &str, options: RequestOptions) -> Result<GatewayResponse> {
        self.gateway.send(path, options).await?.ensure_success()
    }

    async fn get_list<T>(&self, path: &str) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        Ok(self.call(path, RequestOptions::get()).await?.json()?.unwrap_or_default())
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|err| MinutesError::from(InfraError::from(err)))
}

#[async_trait]
impl MeetingsApi for ApiClient {
    #[instrument(skip(self))]
    async fn me(&self) -> Result<Option<User>> {
        let response = self.gateway.send("/auth/me", RequestOptions::get()).await?;
        Ok(User::from_probe_body(response.body.as_ref()))
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn login(&self, credentials: &Credentials) -> Result<User> {
        let body = to_body(credentials)?;
        self.call("/auth/login", RequestOptions::post(Some(body))).await?.require()
    }

    #[instrument(skip(self, form), fields(email = %form.email))]
    async fn signup(&self, form: &SignupForm) -> Result<User> {
        let body = to_body(form)?;
        self.call("/auth/signup", RequestOptions::post(Some(body))).await?.require()
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<()> {
        self.call("/auth/logout", RequestOptions::delete()).await.map(|_| ())
    }

    async fn list_meetings(&self) -> Result<Vec<Meeting>> {
        self.get_list("/meetings").await
    }

    #[instrument(skip(self, meeting), fields(title = %meeting.title))]
    async fn create_meeting(&self, meeting: &NewMeeting) -> Result<Meeting> {
        let body = to_body(meeting)?;
        self.call("/meetings", RequestOptions::post(Some(body))).await?.require()
    }

    async fn get_meeting(&self, id: i64) -> Result<Meeting> {
        self.call(&format!("/meetings/{id}"), RequestOptions::get()).await?.require()
    }

    #[instrument(skip(self, patch))]
    async fn update_meeting(&self, id: i64, patch: &MeetingPatch) -> Result<Meeting> {
        let body = to_body(patch)?;
        self.call(&format!("/meetings/{id}"), RequestOptions::patch(body)).await?.require()
    }

    #[instrument(skip(self))]
    async fn delete_meeting(&self, id: i64) -> Result<()> {
        self.call(&format!("/meetings/{id}"), RequestOptions::delete()).await.map(|_| ())
    }

    #[instrument(skip(self))]
    async fn summarize(&self, meeting_id: i64) -> Result<()> {
        let path = format!("/meetings/{meeting_id}/summarize");
        self.call(&path, RequestOptions::post(None)).await.map(|_| ())
    }

    #[instrument(skip(self))]
    async fn get_summary(
        &self,
        meeting_id: i64,
        validator: Option<&str>,
    ) -> Result<Conditional<SummaryPayload>> {
        let path = format!("/meetings/{meeting_id}/summary");
        let response =
            self.gateway.send(&path, RequestOptions::get().with_validator(validator)).await?;
        if response.is_not_modified() {
            return Ok(Conditional::Unchanged);
        }

        let response = response.ensure_success()?;
        let body = response.json::<SummaryPayload>().unwrap_or_else(|err| {
            debug!(error = %err, "summary body not decodable");
            None
        });
        Ok(Conditional::Fresh { body, validator: response.validator })
    }

    async fn list_action_items(&self, meeting_id: i64) -> Result<Vec<ActionItem>> {
        self.get_list(&format!("/meetings/{meeting_id}/action-items")).await
    }

    #[instrument(skip(self, item))]
    async fn create_action_item(&self, meeting_id: i64, item: &NewActionItem) -> Result<ActionItem> {
        let body = to_body(item)?;
        let path = format!("/meetings/{meeting_id}/action-items");
        self.call(&path, RequestOptions::post(Some(body))).await?.require()
    }

    #[instrument(skip(self, patch))]
    async fn update_action_item(&self, id: i64, patch: &ActionItemPatch) -> Result<ActionItem> {
        let body = to_body(patch)?;
        self.call(&format!("/action-items/{id}"), RequestOptions::patch(body)).await?.require()
    }

    #[instrument(skip(self))]
    async fn delete_action_item(&self, id: i64) -> Result<()> {
        self.call(&format!("/action-items/{id}"), RequestOptions::delete()).await.map(|_| ())
    }

    async fn google_status(&self) -> Result<GoogleStatus> {
        Ok(self.call("/google/status", RequestOptions::get()).await?.json()?.unwrap_or_default())
    }

    async fn google_events(&self) -> Result<Vec<CalendarEvent>> {
        self.get_list("/google/events").await
    }

    #[instrument(skip(self))]
    async fn google_disconnect(&self) -> Result<()> {
        self.call("/google/disconnect", RequestOptions::delete()).await.map(|_| ())
    }

    fn google_login_url(&self) -> String {
        self.gateway.url("/google/login")
    }
}

impl UnauthorizedSignal for ApiClient {
    fn set_unauthorized_handler(&self, handler: UnauthorizedHandler) {
        self.gateway.set_unauthorized_handler(handler);
    }

    fn clear_unauthorized_handler(&self) {
        self.gateway.clear_unauthorized_handler();
    }
}
