use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
};
use chrono::NaiveDate;
use fragments::{Fragment, FragmentResponse};
use parking_lot::RwLock;
use serde::Deserialize;
use std::sync::Arc;

use crate::status::{ACTIVITIES, MINUTE_CHOICES, NewStatusEntry, PROJECTS, StatusEntry, StatusStore};

#[derive(Debug, Deserialize)]
pub struct CreateStatusForm {
    date: NaiveDate,
    project: String,
    activity: String,
    hours: u8,
    minutes: u8,
    description: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Custom error type for status handler operations.
#[derive(Debug, thiserror::Error)]
enum StatusError {
    /// Represents an error during template rendering.
    #[error("Template rendering failed")]
    Template(#[from] askama::Error),
    /// A required form field was missing or blank.
    #[error("required field `{0}` is missing or blank")]
    MissingField(&'static str),
    /// The minutes value is outside the set the form offers.
    #[error("minutes must be one of 0, 15, 30 or 45, got {0}")]
    InvalidMinutes(u8),
}

impl axum::response::IntoResponse for StatusError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match self {
            StatusError::MissingField(_) | StatusError::InvalidMinutes(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            StatusError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status_code, Html(String::new())).into_response()
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    entries: &'a [StatusEntry],
    today: String,
    projects: &'static [&'static str],
    activities: &'static [&'static str],
    minutes: &'static [u8],
}

impl<'a> IndexTemplate<'a> {
    pub fn new(entries: &'a [StatusEntry], today: String) -> Self {
        Self {
            entries,
            today,
            projects: &PROJECTS,
            activities: &ACTIVITIES,
            minutes: &MINUTE_CHOICES,
        }
    }
}

#[derive(Template)]
#[template(path = "status/table.html")]
struct StatusTableTemplate<'a> {
    entries: &'a [StatusEntry],
}

impl<'a> StatusTableTemplate<'a> {
    pub fn new(entries: &'a [StatusEntry]) -> Self {
        Self { entries }
    }
}

#[derive(Template)]
#[template(path = "status/row.html")]
struct StatusRowTemplate<'a> {
    entry: &'a StatusEntry,
}

impl<'a> StatusRowTemplate<'a> {
    pub fn new(entry: &'a StatusEntry) -> Self {
        Self { entry }
    }
}

pub struct StatusState {
    pub store: RwLock<StatusStore>,
}

/// Handler for GET / that assembles the full daily-status page.
#[tracing::instrument(skip(state))]
async fn index_handler(State(state): State<Arc<StatusState>>) -> Result<Html<String>, StatusError> {
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let store = state.store.read();
    let template = IndexTemplate::new(store.all(), today);
    template.render().map(Html).map_err(StatusError::from)
}

/// Handler for GET /history/search that returns the full table fragment,
/// shell included, because the search targets the whole table region.
#[tracing::instrument(skip(state))]
async fn search_history_handler(
    State(state): State<Arc<StatusState>>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, StatusError> {
    let store = state.store.read();
    let matches = store.search(&params.q);
    let markup = StatusTableTemplate::new(&matches).render()?;

    let response = FragmentResponse::new(Fragment::primary("history-container", markup));
    Ok(Html(response.into_markup()))
}

/// Handler for POST /status that stores a new entry and returns only its row
/// fragment; the client prepends it into the existing table body.
#[tracing::instrument(skip(state))]
async fn create_status_handler(
    State(state): State<Arc<StatusState>>,
    Form(form): Form<CreateStatusForm>,
) -> Result<Html<String>, StatusError> {
    if form.project.trim().is_empty() {
        return Err(StatusError::MissingField("project"));
    }
    if form.activity.trim().is_empty() {
        return Err(StatusError::MissingField("activity"));
    }
    if form.description.trim().is_empty() {
        return Err(StatusError::MissingField("description"));
    }
    if !MINUTE_CHOICES.contains(&form.minutes) {
        return Err(StatusError::InvalidMinutes(form.minutes));
    }

    let mut store = state.store.write();
    let entry = store.create(NewStatusEntry {
        date: form.date,
        project: form.project,
        activity: form.activity,
        hours: form.hours,
        minutes: form.minutes,
        description: form.description,
    });
    let markup = StatusRowTemplate::new(&entry).render()?;

    let response = FragmentResponse::new(Fragment::primary("history-list", markup));
    Ok(Html(response.into_markup()))
}

/// Creates and returns the status router with all status-related routes.
pub fn create_status_router(state: Arc<StatusState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/status", axum::routing::post(create_status_handler))
        .route("/history/search", get(search_history_handler))
        .with_state(state)
}
