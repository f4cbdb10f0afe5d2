//! Burndown route handler.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use burndown_core::burndown::{generate_burndown, Burndown};
use burndown_core::sprint::SprintConfig;
use burndown_core::BurndownError;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::state::AppState;

fn error_response(err: BurndownError) -> (StatusCode, String) {
    let status = match err {
        BurndownError::DeadlineExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(error = %err, status = %status, "Burndown request failed");
    (status, err.to_string())
}

/// POST /burndown - Compute the burndown for the board and sprint in the body.
///
/// The whole computation runs under the request deadline; when it expires or
/// the client goes away, outstanding remote calls are dropped.
pub async fn create_burndown(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Burndown>, (StatusCode, String)> {
    let sprint = SprintConfig::from_slice(&body).map_err(error_response)?;
    info!(board_id = %sprint.board_id, begin = %sprint.begin, length = sprint.length, "Burndown requested");

    let deadline = state.request_timeout;
    let burndown = tokio::time::timeout(
        deadline,
        generate_burndown(Arc::clone(&state.api), &sprint, &state.titles, Utc::now()),
    )
    .await
    .map_err(|_| error_response(BurndownError::DeadlineExceeded(deadline)))?
    .map_err(error_response)?;

    Ok(Json(burndown))
}
