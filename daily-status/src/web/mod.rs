use axum::Router;
use parking_lot::RwLock;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::status::StatusStore;
use crate::status::web::{StatusState, create_status_router};

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let status_state = Arc::new(StatusState {
        store: RwLock::new(StatusStore::seeded(config.seed_count)),
    });
    let status_router = create_status_router(status_state);

    let app = Router::new()
        .merge(status_router)
        .route("/health", axum::routing::get(health_check_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    axum::serve(listener, app).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}
