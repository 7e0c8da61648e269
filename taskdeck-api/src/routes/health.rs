/// Health check endpoint
///
/// `GET /health` reports process liveness and database connectivity. No
/// authentication; intended for load balancers and deployment probes.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use taskdeck_shared::db::pool;

use crate::app::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: "ok" or "degraded"
    pub status: String,

    /// Whether the database answered the check query
    pub database: bool,

    /// Crate version
    pub version: String,
}

/// Returns 200 when the database is reachable, 503 otherwise
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = pool::health_check(&state.db).await.is_ok();

    let (status_code, status) = if database {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            database,
            version: taskdeck_shared::VERSION.to_string(),
        }),
    )
}
