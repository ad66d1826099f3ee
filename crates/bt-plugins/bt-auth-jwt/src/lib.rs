//! # bt-auth-jwt
//!
//! jsonwebtoken-based implementation of `AuthProvider`.
//! HS256 tokens signed with a process-wide secret, one hour of validity,
//! caller identity carried in the `sub` claim.

use bt_core::error::{AppError, Result};
use bt_core::traits::AuthProvider;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Tokens expire one hour after issuance.
const TOKEN_TTL_SECONDS: i64 = 3600;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Caller identity. Empty means the payload is unusable.
    #[serde(default)]
    sub: String,
    exp: i64,
    iat: i64,
}

pub struct JwtAuthProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtAuthProvider {
    /// Takes the shared signing secret (e.g., from configuration).
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl AuthProvider for JwtAuthProvider {
    /// Signature, expiry, and claim-shape checks all collapse to
    /// `Unauthorized`; the caller never learns which check failed.
    fn verify(&self, token: &str) -> Result<String> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;

        if data.claims.sub.is_empty() {
            return Err(AppError::Unauthorized("Invalid token payload".to_string()));
        }

        Ok(data.claims.sub)
    }

    fn issue(&self, caller_id: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: caller_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(TOKEN_TTL_SECONDS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("token signing failed: {e}")))
    }
}
