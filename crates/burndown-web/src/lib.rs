//! Burndown Web Server
//!
//! Axum-based server exposing the burndown endpoint and the static chart UI.

pub mod routes;
pub mod state;

use axum::{routing::post, Router};
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/burndown", post(routes::burndown::create_burndown))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(state: AppState, static_dir: &Path, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state, static_dir);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
