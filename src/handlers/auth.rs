use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::password;
use crate::repository::{LoginIdentity, NewUser, UserRepository};
use crate::schemas::{AppState, ErrorResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use model::entities::user;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Request body for registering a new player
///
/// Fields are optional so a missing one is reported as missing credentials
/// rather than as an unparsable body.
#[derive(Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct RegisterRequest {
    /// Username (must be unique)
    #[validate(required, length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Email address (must be unique)
    #[validate(required, length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Plaintext password, hashed before it is stored
    #[validate(required, length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Request body for logging in by username or email
#[derive(Default, Deserialize, Serialize, ToSchema, Validate)]
#[validate(schema(function = "validate_login_identity"))]
pub struct LoginRequest {
    /// Username; takes precedence over `email` when both are given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl LoginRequest {
    /// The column to look the user up by. Empty strings count as absent.
    pub fn identity(&self) -> Option<LoginIdentity<'_>> {
        non_empty(&self.username)
            .map(LoginIdentity::Username)
            .or_else(|| non_empty(&self.email).map(LoginIdentity::Email))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn validate_login_identity(request: &LoginRequest) -> Result<(), ValidationError> {
    match request.identity() {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("missing_identity")),
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// User as shown to clients. Has no password field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
        }
    }
}

/// Successful registration or login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// Always true
    pub success: bool,
    pub user: UserResponse,
}

impl AuthResponse {
    fn for_user(model: user::Model) -> Self {
        Self {
            success: true,
            user: UserResponse::from(model),
        }
    }
}

/// Register a new player
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Malformed body or missing field", body = ErrorResponse),
        (status = 500, description = "Registration failed", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    trace!("Entering register function");
    let RegisterRequest {
        username: Some(username),
        email: Some(email),
        password: Some(plaintext),
    } = request
    else {
        return Err(AppError::MissingCredentials);
    };
    debug!("Registering user with username: {}", username);

    let password_hash = password::hash_password(plaintext)
        .await
        .map_err(AppError::registration)?;

    let user_model = UserRepository::new(&state.db)
        .create(NewUser {
            username,
            email,
            password_hash,
        })
        .await
        .map_err(AppError::registration)?;

    info!(
        "User registered with ID: {}, username: {}",
        user_model.id, user_model.username
    );
    Ok((StatusCode::CREATED, Json(AuthResponse::for_user(user_model))))
}

/// Log in with username or email plus password
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = AuthResponse),
        (status = 400, description = "Missing credentials", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Login failed", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    trace!("Entering login function");
    let (Some(identity), Some(plaintext)) = (request.identity(), request.password.clone()) else {
        return Err(AppError::MissingCredentials);
    };
    debug!("Login attempt for {:?}", identity);

    let found = UserRepository::new(&state.db)
        .find_by_identity(identity)
        .await
        .map_err(AppError::login)?;

    let Some(user_model) = found else {
        warn!("Login rejected: no user for {:?}", identity);
        return Err(AppError::InvalidCredentials);
    };

    let matches = password::verify_password(plaintext, user_model.password.clone())
        .await
        .map_err(AppError::login)?;
    if !matches {
        warn!("Login rejected: wrong password for user ID {}", user_model.id);
        return Err(AppError::InvalidCredentials);
    }

    info!("User ID {} logged in", user_model.id);
    Ok(Json(AuthResponse::for_user(user_model)))
}
