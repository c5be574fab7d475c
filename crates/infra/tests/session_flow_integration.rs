//! End-to-end tests: core session and view models driven through the real
//! HTTP stack against a mock API server.

mod support;

use std::sync::Arc;

use minutes_core::{
    guard, Access, MeetingDetail, MeetingsBoard, Navigator, Route, SessionState, SessionStore,
};
use minutes_domain::{Credentials, MinutesError};
use minutes_infra::{ApiClient, Gateway, HttpClient};
use serde_json::json;
use support::{meeting_json, summary_json, user_json, RecordingNavigator};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> Arc<ApiClient> {
    let gateway = Gateway::new(HttpClient::new().expect("http client"), &server.uri())
        .expect("gateway");
    Arc::new(ApiClient::new(Arc::new(gateway)))
}

async fn mount_unauthorized_me(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "unauthorized"})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn boot_without_session_is_anonymous_and_stays_put() {
    let server = MockServer::start().await;
    mount_unauthorized_me(&server).await;
    let navigator = RecordingNavigator::at(Route::Meetings);
    let store = SessionStore::attach(api_for(&server), navigator.clone());

    assert_eq!(guard(&store.session()), Access::Loading);
    store.boot().await;

    assert_eq!(store.state(), SessionState::Anonymous);
    assert!(store.is_booted());
    assert_eq!(guard(&store.session()), Access::RedirectToLogin);
    assert!(navigator.history().is_empty());
}

#[tokio::test]
async fn expired_session_redirects_to_login() {
    let server = MockServer::start().await;
    mount_unauthorized_me(&server).await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=s1; Path=/; HttpOnly")
                .set_body_json(user_json()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/meetings"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "unauthorized"})))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let navigator = RecordingNavigator::at(Route::Login);
    let store = SessionStore::attach(api.clone(), navigator.clone());
    store.boot().await;

    let user = store.login(&Credentials::new("pm@demo.com", "secret123")).await.expect("login");
    assert_eq!(user.email, "pm@demo.com");
    navigator.navigate(Route::Meetings);

    let mut board = MeetingsBoard::new(api);
    let err = board.load().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(store.identity(), None);
    assert_eq!(navigator.history(), vec![Route::Meetings, Route::Login]);
    assert!(!board.is_loading());
}

#[tokio::test]
async fn logout_failure_still_clears_identity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "db down"})))
        .mount(&server)
        .await;
    let store = SessionStore::attach(api_for(&server), RecordingNavigator::at(Route::Meetings));
    store.boot().await;
    assert!(matches!(store.state(), SessionState::Authenticated(_)));

    let err = store.logout().await.unwrap_err();

    assert_eq!(err, MinutesError::api(500, "db down"));
    assert_eq!(store.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn create_is_followed_by_reload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/meetings"))
        .respond_with(ResponseTemplate::new(201).set_body_json(meeting_json(1, "Meeting A", "")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/meetings"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([meeting_json(1, "Meeting A", "")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut board = MeetingsBoard::new(api_for(&server));
    board.create("Meeting A", "").await.expect("create");

    assert_eq!(board.meetings().len(), 1);
    assert_eq!(board.meetings()[0].title, "Meeting A");
    let requests = server.received_requests().await.expect("recorded requests");
    let methods: Vec<_> = requests.iter().map(|r| r.method.to_string()).collect();
    assert_eq!(methods, vec!["POST", "GET"]);
}

#[tokio::test]
async fn summary_cache_survives_not_modified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/meetings/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(meeting_json(1, "Kickoff", "notes")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/meetings/1/action-items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/meetings/1/summary"))
        .and(header("if-none-match", "\"s1\""))
        .respond_with(ResponseTemplate::new(304))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/meetings/1/summary"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("ETag", "\"s1\"")
                .set_body_json(summary_json("{not json", "[\"Ship Friday\"]")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut detail = MeetingDetail::new(api_for(&server), 1);
    detail.load().await.expect("load");
    detail.load_summary().await.expect("first summary read");
    let first = detail.summary().clone();

    detail.load_summary().await.expect("conditional summary read");

    assert_eq!(detail.summary(), &first);
    let decoded = detail.decoded_summary().expect("summary");
    assert!(decoded.bullets.is_empty());
    assert_eq!(decoded.decisions, vec!["Ship Friday"]);
    assert_eq!(decoded.caption(), "Model: gpt-4o-mini • tokens: 321");
}
