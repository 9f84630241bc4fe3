//! Caller identity extraction
//!
//! The OIDC login flow lives in the fronting auth layer, which forwards the
//! authenticated subject claim as the `x-user-id` header. Every `/api` route
//! extracts it; a request without one is rejected with 401 before any
//! handler logic runs. Uses the custom-extractor pattern rather than
//! middleware so handlers declare the requirement in their signature.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::HeaderName, request::Parts},
};

use crate::error::ApiError;

/// Header carrying the authenticated subject claim
pub static USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");

/// Authenticated caller identity
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(&USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|subject| !subject.is_empty())
            .map(|subject| AuthUser(subject.to_string()))
            .ok_or_else(|| ApiError::Unauthorized("Missing caller identity".to_string()))
    }
}
