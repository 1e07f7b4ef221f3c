//! Token Manager
//!
//! Signs and verifies HS256 access tokens and mints opaque refresh tokens.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::session::UserRole;

/// Raw bytes in a refresh token before hex encoding.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Length of an encoded refresh token.
pub const REFRESH_TOKEN_LEN: usize = REFRESH_TOKEN_BYTES * 2;

// == Access Claims ==
/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: Uuid,
    pub role: UserRole,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

// == Jwt Manager ==
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("access_ttl", &self.access_ttl)
            .finish_non_exhaustive()
    }
}

impl JwtManager {
    pub fn new(secret: &str, access_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
        }
    }

    /// Signs an access token for `user_id` valid for the configured TTL.
    pub fn new_access(&self, user_id: Uuid, role: UserRole) -> Result<String, SessionError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.access_ttl.as_secs())
            .map_err(|_| SessionError::Token("access token lifetime out of range".into()))?;

        let claims = AccessClaims {
            sub: user_id,
            role,
            iat: now,
            exp: now.saturating_add(ttl),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| SessionError::Token(format!("failed to sign access token: {}", e)))
    }

    /// Returns a fresh random refresh token, hex encoded.
    pub fn new_refresh(&self) -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Verifies signature and expiry and returns the claims.
    pub fn validate(&self, token: &str) -> Result<AccessClaims, SessionError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| SessionError::InvalidToken(e.to_string()))
    }
}
