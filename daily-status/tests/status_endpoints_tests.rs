use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use daily_status::status::{NewStatusEntry, StatusStore};
use daily_status::status::web::{StatusState, create_status_router};
use parking_lot::RwLock;
use std::sync::Arc;
use tower::ServiceExt;

/// Builds the real status router around the given store and returns the
/// shared state so tests can inspect the store after requests.
fn setup(store: StatusStore) -> (Router, Arc<StatusState>) {
    let state = Arc::new(StatusState {
        store: RwLock::new(store),
    });
    (create_status_router(state.clone()), state)
}

/// A store with two known entries; the later-created one sits on top.
fn sample_store() -> StatusStore {
    let mut store = StatusStore::new();
    store.create(NewStatusEntry {
        date: "2024-01-01".parse().unwrap(),
        project: "Internal HRMS".to_string(),
        activity: "Meetings".to_string(),
        hours: 1,
        minutes: 0,
        description: "Daily standup and sprint planning".to_string(),
    });
    store.create(NewStatusEntry {
        date: "2024-01-03".parse().unwrap(),
        project: "Client Portal A".to_string(),
        activity: "Coding".to_string(),
        hours: 4,
        minutes: 30,
        description: "Refactored API middleware".to_string(),
    });
    store
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn read_body(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn can_render_index_page() {
    let (app, _) = setup(sample_store());

    let response = app.oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(body.contains("id=\"history-container\""));
    assert!(body.contains("id=\"history-list\""));
    assert!(body.contains("hx-post=\"/status\""));
    assert!(body.contains("Refactored API middleware"));
    assert!(body.contains("Daily standup and sprint planning"));
}

#[tokio::test]
async fn creating_entry_returns_only_the_row_fragment() {
    let (app, state) = setup(sample_store());

    let response = app
        .oneshot(form_request(
            "/status",
            "date=2024-02-10&project=AI+Research&activity=Coding&hours=3&minutes=30&description=Optimized+database+queries",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(body.contains("10/02/2024"));
    assert!(body.contains("AI Research"));
    assert!(body.contains("3h 30m"));
    assert!(body.contains("Optimized database queries"));
    // The client prepends into the existing table; the shell is not re-sent.
    assert!(!body.contains("<table"));
    assert!(!body.contains("<thead"));

    let store = state.store.read();
    assert_eq!(store.all().len(), 3);
    assert_eq!(store.all()[0].description(), "Optimized database queries");
}

#[tokio::test]
async fn created_entry_ids_keep_increasing() {
    let (app, state) = setup(sample_store());

    let response = app
        .oneshot(form_request(
            "/status",
            "date=2024-02-10&project=AI+Research&activity=Coding&hours=1&minutes=0&description=More+work",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.store.read().all()[0].id(), 3);
}

#[tokio::test]
async fn creating_entry_with_blank_description_is_rejected() {
    let (app, state) = setup(sample_store());

    let response = app
        .oneshot(form_request(
            "/status",
            "date=2024-02-10&project=AI+Research&activity=Coding&hours=1&minutes=0&description=++",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(state.store.read().all().len(), 2);
}

#[tokio::test]
async fn creating_entry_with_unlisted_minutes_is_rejected() {
    let (app, state) = setup(sample_store());

    let response = app
        .oneshot(form_request(
            "/status",
            "date=2024-02-10&project=AI+Research&activity=Coding&hours=1&minutes=20&description=Work",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(state.store.read().all().len(), 2);
}

#[tokio::test]
async fn creating_entry_with_malformed_date_is_rejected() {
    let (app, state) = setup(sample_store());

    let response = app
        .oneshot(form_request(
            "/status",
            "date=not-a-date&project=AI+Research&activity=Coding&hours=1&minutes=0&description=Work",
        ))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(state.store.read().all().len(), 2);
}

#[tokio::test]
async fn created_description_is_html_escaped() {
    let (app, _) = setup(StatusStore::new());

    let response = app
        .oneshot(form_request(
            "/status",
            "date=2024-02-10&project=AI+Research&activity=Coding&hours=1&minutes=0&description=%3Cscript%3Ealert(1)%3C%2Fscript%3E",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(!body.contains("<script>"));
    assert!(body.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn searching_history_returns_the_full_table_fragment() {
    let (app, _) = setup(sample_store());

    let response = app
        .oneshot(get_request("/history/search?q=coding"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    // The search targets the whole table region, shell included.
    assert!(body.contains("<table"));
    assert!(body.contains("<thead"));
    assert!(body.contains("Client Portal A"));
    assert!(!body.contains("Internal HRMS"));
}

#[tokio::test]
async fn searching_matches_descriptions_case_insensitively() {
    let (app, _) = setup(sample_store());

    let response = app
        .oneshot(get_request("/history/search?q=STANDUP"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(body.contains("Internal HRMS"));
    assert!(!body.contains("Client Portal A"));
}

#[tokio::test]
async fn searching_without_query_returns_the_full_history() {
    let (app, _) = setup(sample_store());

    let response = app.oneshot(get_request("/history/search")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(body.contains("Internal HRMS"));
    assert!(body.contains("Client Portal A"));
}
