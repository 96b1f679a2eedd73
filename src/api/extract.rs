use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::errors::ApiError;

/// JSON body extractor that reports parse and shape failures as
/// `ApiError::InvalidRequest` (HTTP 400) instead of axum's plain-text 415/422.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidatedJson(value)),
            Err(rejection) => {
                let message = rejection.body_text();
                debug!(%message, "rejected request body");
                Err(ApiError::InvalidRequest(message))
            }
        }
    }
}
