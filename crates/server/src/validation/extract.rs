//! Axum extractors that validate before the handler runs.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::Validate;
use crate::error::AppError;

/// JSON body that passed validation.
///
/// Malformed JSON, a wrong content type and rule violations all reject
/// with 422.
pub struct ValidatedJson<T: Validate>(pub T::Output);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Unprocessable(rejection.body_text()))?;

        raw.validate().map(Self).map_err(AppError::Validation)
    }
}

/// Path parameters that passed validation. Rejects with 400.
pub struct ValidatedPath<T: Validate>(pub T::Output);

impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        raw.validate()
            .map(Self)
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}
