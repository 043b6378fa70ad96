use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by a watchlist bearer token. Tokens are issued elsewhere;
/// this service only verifies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identity: the user's row id in the external users table.
    pub id: i32,
    pub email: String,
    /// Expiry as a unix timestamp. Required; a token without one is rejected.
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header required")]
    MissingCredential,

    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),
}

/// Verifies bearer credentials against the shared signing secret.
///
/// Verification is pure: no clock state beyond "now", no I/O. The validation
/// is pinned to HS256, so a token claiming any other algorithm (including
/// "none") fails before its signature is even considered.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verify a raw credential and extract its claims.
    ///
    /// Accepts either `Bearer <token>` or a bare token; the prefix is
    /// stripped before parsing. Checks run in order: structure, algorithm,
    /// signature, expiry. Any failure collapses into a single 401-grade
    /// error whose message carries the cause.
    pub fn verify(&self, credential: &str) -> Result<Claims, AuthError> {
        let token = credential.strip_prefix("Bearer ").unwrap_or(credential);

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(data.claims)
    }
}
