use axum::Router;
use parking_lot::RwLock;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::task::TaskStore;
use crate::task::web::{TaskState, create_task_router};

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let task_state = Arc::new(TaskState {
        store: RwLock::new(TaskStore::with_demo_tasks()),
    });
    let task_router = create_task_router(task_state);

    let app = Router::new()
        .merge(task_router)
        .route("/health", axum::routing::get(health_check_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    axum::serve(listener, app).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}
