use crate::error::AppError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

/// JSON body extractor that runs `validator` rules before the handler sees the value.
///
/// Unparsable bodies become [`AppError::InvalidBody`]. Rule violations become
/// [`AppError::MissingCredentials`], since the request schemas only check that
/// credentials are present.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::InvalidBody(rejection.body_text()))?;

        if let Err(errors) = value.validate() {
            debug!("Request body failed validation: {}", errors);
            return Err(AppError::MissingCredentials);
        }

        Ok(ValidatedJson(value))
    }
}
