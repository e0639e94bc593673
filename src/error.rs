use crate::password::PasswordError;
use crate::repository::StoreError;
use crate::schemas::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::{debug, error};

/// Why a registration or login could not be completed server side.
#[derive(Debug, Error)]
pub enum FailureCause {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Every way a handler can fail, mapped one-to-one onto an HTTP status.
///
/// Server-side causes are logged when the error is rendered and never written
/// to the response body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("missing credentials")]
    MissingCredentials,

    /// Unknown user and wrong password collapse into this one variant.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("registration failed: {0}")]
    RegistrationFailed(#[source] FailureCause),

    #[error("login failed: {0}")]
    LoginFailed(#[source] FailureCause),
}

impl AppError {
    pub fn registration(cause: impl Into<FailureCause>) -> Self {
        AppError::RegistrationFailed(cause.into())
    }

    pub fn login(cause: impl Into<FailureCause>) -> Self {
        AppError::LoginFailed(cause.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::MissingCredentials => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::RegistrationFailed(_) | Self::LoginFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::MissingCredentials => "MISSING_CREDENTIALS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::RegistrationFailed(_) => "REGISTRATION_FAILED",
            Self::LoginFailed(_) => "LOGIN_FAILED",
        }
    }

    /// The message a client sees.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidBody(_) => "Invalid request body",
            Self::MissingCredentials => "Missing credentials",
            Self::InvalidCredentials => "Invalid username or password",
            Self::RegistrationFailed(_) => "Registration failed",
            Self::LoginFailed(_) => "Login failed",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            debug!("Rejecting request with {}: {}", status, self);
        }

        let body = ErrorResponse {
            error: self.public_message().to_string(),
            code: self.code().to_string(),
            success: false,
        };
        (status, Json(body)).into_response()
    }
}
