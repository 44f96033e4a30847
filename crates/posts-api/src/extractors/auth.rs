//! Bearer token extractor
//!
//! Pulls the raw token out of `Authorization: Bearer <token>`. Decoding and
//! expiry checks happen in the service layer, so every operation fails closed
//! through the same path.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::response::ApiError;

/// Raw bearer token from the request
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header_present = parts.headers.contains_key(AUTHORIZATION);

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    if header_present {
                        tracing::warn!("Authorization header is not a bearer token");
                        ApiError::InvalidAuthFormat
                    } else {
                        ApiError::MissingAuth
                    }
                })?;

        Ok(BearerToken(bearer.token().to_string()))
    }
}
