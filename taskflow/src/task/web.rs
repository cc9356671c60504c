use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
};
use fragments::{Fragment, FragmentResponse};
use parking_lot::RwLock;
use serde::Deserialize;
use std::sync::Arc;

use crate::task::{Task, TaskStats, TaskStore, TaskStoreError};

/// DOM id of the stats aggregate container targeted by out-of-band swaps.
const STATS_TARGET: &str = "stats-grid";

#[derive(Debug, Deserialize)]
pub struct CreateTaskForm {
    text: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameTaskForm {
    text: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Custom error type for task handler operations.
#[derive(Debug, thiserror::Error)]
enum TaskError {
    /// Represents an error during template rendering.
    #[error("Template rendering failed")]
    Template(#[from] askama::Error),
    /// Represents a task store error.
    #[error("Task store error")]
    Store(#[from] TaskStoreError),
    /// A required form field was missing or blank.
    #[error("required field `{0}` is missing or blank")]
    MissingField(&'static str),
}

impl axum::response::IntoResponse for TaskError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match self {
            TaskError::Store(TaskStoreError::TaskNotFound(_)) => StatusCode::NOT_FOUND,
            TaskError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TaskError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Fragment endpoints answer failures with an empty body; the client
        // leaves its DOM untouched on non-2xx responses.
        (status_code, Html(String::new())).into_response()
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    tasks: &'a [Task],
    stats: TaskStats,
}

impl<'a> IndexTemplate<'a> {
    pub fn new(tasks: &'a [Task], stats: TaskStats) -> Self {
        Self { tasks, stats }
    }
}

#[derive(Template)]
#[template(path = "tasks/task_item.html")]
struct TaskItemTemplate<'a> {
    task: &'a Task,
}

impl<'a> TaskItemTemplate<'a> {
    pub fn new(task: &'a Task) -> Self {
        Self { task }
    }
}

#[derive(Template)]
#[template(path = "tasks/task_list.html")]
struct TaskListTemplate<'a> {
    tasks: &'a [Task],
}

impl<'a> TaskListTemplate<'a> {
    pub fn new(tasks: &'a [Task]) -> Self {
        Self { tasks }
    }
}

#[derive(Template)]
#[template(path = "tasks/edit_form.html")]
struct EditFormTemplate<'a> {
    task: &'a Task,
}

impl<'a> EditFormTemplate<'a> {
    pub fn new(task: &'a Task) -> Self {
        Self { task }
    }
}

#[derive(Template)]
#[template(path = "tasks/stats.html")]
struct StatsTemplate {
    stats: TaskStats,
    oob: bool,
}

impl StatsTemplate {
    pub fn new(stats: TaskStats, oob: bool) -> Self {
        Self { stats, oob }
    }
}

pub struct TaskState {
    pub store: RwLock<TaskStore>,
}

/// Renders the stats aggregate as an out-of-band fragment over the full
/// collection.
fn stats_oob_fragment(store: &TaskStore) -> Result<Fragment, TaskError> {
    let markup = StatsTemplate::new(store.stats(), true).render()?;
    Ok(Fragment::out_of_band(STATS_TARGET, markup))
}

/// Handler for GET / that assembles the full task page.
#[tracing::instrument(skip(state))]
async fn index_handler(State(state): State<Arc<TaskState>>) -> Result<Html<String>, TaskError> {
    let store = state.store.read();
    let template = IndexTemplate::new(store.all(), store.stats());
    template.render().map(Html).map_err(TaskError::from)
}

/// Handler for GET /tasks/search that returns the matching task items,
/// replacing the whole list.
#[tracing::instrument(skip(state))]
async fn search_tasks_handler(
    State(state): State<Arc<TaskState>>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, TaskError> {
    let store = state.store.read();
    let matches = store.search(&params.q);
    let markup = TaskListTemplate::new(&matches).render()?;

    let response = FragmentResponse::new(Fragment::primary("task-list", markup));
    Ok(Html(response.into_markup()))
}

/// Handler for POST /tasks that creates a task and returns the new item plus
/// the updated stats aggregate as an out-of-band fragment.
#[tracing::instrument(skip(state))]
async fn create_task_handler(
    State(state): State<Arc<TaskState>>,
    Form(form): Form<CreateTaskForm>,
) -> Result<Html<String>, TaskError> {
    if form.text.trim().is_empty() {
        return Err(TaskError::MissingField("text"));
    }

    let mut store = state.store.write();
    let task = store.create(form.text);
    let item = TaskItemTemplate::new(&task).render()?;

    let response = FragmentResponse::new(Fragment::primary(format!("task-{}", task.id()), item))
        .with_oob(stats_oob_fragment(&store)?);
    Ok(Html(response.into_markup()))
}

/// Handler for PUT /tasks/{id}/toggle that flips the completed flag and
/// returns the updated item plus the stats aggregate out-of-band.
#[tracing::instrument(skip(state))]
async fn toggle_task_handler(
    State(state): State<Arc<TaskState>>,
    axum::extract::Path(id): axum::extract::Path<u32>,
) -> Result<Html<String>, TaskError> {
    let mut store = state.store.write();
    let task = store.toggle(id)?;
    let item = TaskItemTemplate::new(&task).render()?;

    let response = FragmentResponse::new(Fragment::primary(format!("task-{}", task.id()), item))
        .with_oob(stats_oob_fragment(&store)?);
    Ok(Html(response.into_markup()))
}

/// Handler for GET /tasks/{id}/edit that serves the transient edit form for
/// one task.
#[tracing::instrument(skip(state))]
async fn edit_task_form_handler(
    State(state): State<Arc<TaskState>>,
    axum::extract::Path(id): axum::extract::Path<u32>,
) -> Result<Html<String>, TaskError> {
    let store = state.store.read();
    let task = store.find(id)?;
    let markup = EditFormTemplate::new(task).render()?;

    let response = FragmentResponse::new(Fragment::primary(format!("task-{}", id), markup));
    Ok(Html(response.into_markup()))
}

/// Handler for PUT /tasks/{id} that renames a task. The counts are unchanged
/// by a rename, so no stats fragment accompanies the item.
#[tracing::instrument(skip(state))]
async fn rename_task_handler(
    State(state): State<Arc<TaskState>>,
    axum::extract::Path(id): axum::extract::Path<u32>,
    Form(form): Form<RenameTaskForm>,
) -> Result<Html<String>, TaskError> {
    if form.text.trim().is_empty() {
        return Err(TaskError::MissingField("text"));
    }

    let mut store = state.store.write();
    let task = store.rename(id, form.text)?;
    let item = TaskItemTemplate::new(&task).render()?;

    let response = FragmentResponse::new(Fragment::primary(format!("task-{}", task.id()), item));
    Ok(Html(response.into_markup()))
}

/// Handler for DELETE /tasks/{id} that removes a task. The empty primary
/// fragment removes the list item; the stats aggregate rides along
/// out-of-band.
#[tracing::instrument(skip(state))]
async fn delete_task_handler(
    State(state): State<Arc<TaskState>>,
    axum::extract::Path(id): axum::extract::Path<u32>,
) -> Result<Html<String>, TaskError> {
    let mut store = state.store.write();
    let task = store.delete(id)?;

    let response = FragmentResponse::removal(format!("task-{}", task.id()))
        .with_oob(stats_oob_fragment(&store)?);
    Ok(Html(response.into_markup()))
}

/// Creates and returns the task router with all task-related routes.
pub fn create_task_router(state: Arc<TaskState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/tasks", axum::routing::post(create_task_handler))
        .route("/tasks/search", get(search_tasks_handler))
        .route(
            "/tasks/{id}",
            axum::routing::put(rename_task_handler).delete(delete_task_handler),
        )
        .route("/tasks/{id}/toggle", axum::routing::put(toggle_task_handler))
        .route("/tasks/{id}/edit", get(edit_task_form_handler))
        .with_state(state)
}
