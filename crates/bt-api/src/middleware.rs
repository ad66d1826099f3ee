//! # Authentication Guard
//!
//! Bearer-token extraction and verification, expressed as an axum
//! extractor. Mutating handlers take a [`Caller`] argument; read-only
//! handlers simply do not, which is how the per-endpoint auth table in
//! the REST surface is enforced.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use bt_core::error::AppError;

use crate::error::ApiError;
use crate::AppState;

/// The verified caller identity, as carried by the bearer credential.
#[derive(Debug, Clone)]
pub struct Caller(pub String);

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError(AppError::Unauthorized("No token provided".to_string())))?;

        let caller_id = state.auth.verify(token)?;
        Ok(Caller(caller_id))
    }
}
