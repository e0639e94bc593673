use axum::{extract::State, response::Json};
use tracing::{instrument, trace, warn};
use crate::schemas::{AppState, HealthResponse, PongResponse, WelcomeResponse};

/// Welcome endpoint
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = WelcomeResponse)
    )
)]
#[instrument]
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Tic Tac Toe API!".to_string(),
    })
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/ping",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = PongResponse)
    )
)]
#[instrument]
pub async fn ping() -> Json<PongResponse> {
    trace!("ping");
    Json(PongResponse {
        pong: "it works!".to_string(),
    })
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Test database connection
    let db_status = match state.db.ping().await {
        Ok(_) => "connected".to_string(),
        Err(e) => {
            warn!("Database ping failed: {}", e);
            "disconnected".to_string()
        }
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    })
}
