use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// JSON body extractor rejecting with [`AppError`].
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::ApiJson;
///
/// async fn create(ApiJson(body): ApiJson<serde_json::Map<String, serde_json::Value>>) {}
/// ```
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}
