use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderName;

use crate::http::ApiError;

const API_KEY_HEADER: HeaderName = HeaderName::from_static("api-key");

/// The caller's opaque identity key, taken from the `api-key` header.
/// Resolution to an actual user happens inside the services, so an unknown
/// key surfaces as `NotFound` from the operation itself.
#[derive(Debug, Clone)]
pub struct ApiKey(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for ApiKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let api_key = parts
            .headers
            .get(&API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("missing api-key header"))?;

        Ok(ApiKey(api_key.to_string()))
    }
}
