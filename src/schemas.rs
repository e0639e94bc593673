use crate::handlers::auth::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Pooled database connection
    pub db: DatabaseConnection,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message, safe to show to the client
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Welcome message served at the root path
#[derive(Serialize, Deserialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Liveness probe response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct PongResponse {
    pub pong: String,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::welcome,
        crate::handlers::health::ping,
        crate::handlers::health::health_check,
        crate::handlers::auth::register,
        crate::handlers::auth::login,
    ),
    components(
        schemas(
            AuthResponse,
            ErrorResponse,
            HealthResponse,
            LoginRequest,
            PongResponse,
            RegisterRequest,
            UserResponse,
            WelcomeResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness and health check endpoints"),
        (name = "auth", description = "Player registration and login"),
    ),
    info(
        title = "Tic Tac Toe API",
        description = "Account service for the Tic Tac Toe game",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
