//! Session Service
//!
//! Issues access/refresh token pairs and rotates them on refresh.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::SessionError;
use crate::session::{AccessClaims, JwtManager, Session, SessionRepository, UserRole};

/// Access token plus the refresh token that can replace it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug)]
pub struct SessionService {
    repository: SessionRepository,
    jwt: JwtManager,
    session_ttl: Duration,
}

impl SessionService {
    pub fn new(repository: SessionRepository, jwt: JwtManager, session_ttl: Duration) -> Self {
        Self {
            repository,
            jwt,
            session_ttl,
        }
    }

    // == Create Session ==
    /// Starts a session for `user_id` and returns its first token pair.
    pub fn create_session(&self, user_id: Uuid, role: UserRole) -> Result<TokenPair, SessionError> {
        let pair = self.issue(user_id, role)?;
        info!(%user_id, %role, "Session created");
        Ok(pair)
    }

    // == Refresh ==
    /// Redeems `refresh_token` and returns a new pair for the same user.
    ///
    /// The old refresh token is consumed even if issuing the new pair fails.
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, SessionError> {
        let session = self
            .repository
            .session_by_token(refresh_token)
            .inspect_err(|_| warn!("Refresh with unknown or used token"))?;

        let pair = self.issue(session.user_id, session.role)?;
        info!(user_id = %session.user_id, "Session refreshed");
        Ok(pair)
    }

    // == Validate Access ==
    pub fn validate_access(&self, token: &str) -> Result<AccessClaims, SessionError> {
        self.jwt.validate(token)
    }

    pub fn repository(&self) -> &SessionRepository {
        &self.repository
    }

    fn issue(&self, user_id: Uuid, role: UserRole) -> Result<TokenPair, SessionError> {
        let access_token = self.jwt.new_access(user_id, role)?;
        let refresh_token = self.jwt.new_refresh();

        self.repository.save_session(Session {
            token: refresh_token.clone(),
            user_id,
            role,
            expires_at: deadline(self.session_ttl)?,
        });

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

/// `now + ttl`, or an error if the sum leaves chrono's range.
fn deadline(ttl: Duration) -> Result<DateTime<Utc>, SessionError> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| SessionError::Token(format!("session lifetime {:?} out of range", ttl)))
}
