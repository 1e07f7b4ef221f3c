//! Session Repository
//!
//! Stores refresh-token sessions in an [`ExpiringCache`]. Lookups consume
//! the session, so each refresh token can be redeemed once.

use tracing::debug;

use crate::cache::{CacheStats, ExpiringCache};
use crate::error::SessionError;
use crate::session::Session;

/// Refresh-token session store.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    cache: ExpiringCache<String, Session>,
}

impl SessionRepository {
    pub fn new(cache: ExpiringCache<String, Session>) -> Self {
        Self { cache }
    }

    /// Stores `session` under its own token.
    pub fn save_session(&self, session: Session) {
        debug!(user_id = %session.user_id, "Saving session");
        self.cache.put(session.token.clone(), session);
    }

    /// Takes the session for `token` out of the store.
    ///
    /// Unknown, already redeemed, and reaped tokens all yield
    /// [`SessionError::NotFound`].
    pub fn session_by_token(&self, token: &str) -> Result<Session, SessionError> {
        self.cache
            .get_with_delete(token)
            .map_err(|_| SessionError::NotFound)
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn is_reaping(&self) -> bool {
        self.cache.is_reaping()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserRole;
    use chrono::{Duration as ChronoDuration, Utc};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;
    use uuid::Uuid;

    fn session(token: &str, offset_secs: i64) -> Session {
        Session {
            token: token.to_string(),
            user_id: Uuid::new_v4(),
            role: UserRole::User,
            expires_at: Utc::now() + ChronoDuration::seconds(offset_secs),
        }
    }

    #[tokio::test]
    async fn test_session_is_single_use() {
        let cancel = CancellationToken::new();
        let repo = SessionRepository::new(ExpiringCache::new(Duration::from_secs(60), cancel.clone()));
        let saved = session("t1", 3600);

        repo.save_session(saved.clone());

        assert_eq!(repo.session_by_token("t1").unwrap(), saved);
        assert!(matches!(repo.session_by_token("t1"), Err(SessionError::NotFound)));
        cancel.cancel();
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let cancel = CancellationToken::new();
        let repo = SessionRepository::new(ExpiringCache::new(Duration::from_secs(60), cancel.clone()));

        assert!(matches!(repo.session_by_token("nope"), Err(SessionError::NotFound)));
        cancel.cancel();
    }

    #[tokio::test]
    async fn test_reaped_session_not_found() {
        let cancel = CancellationToken::new();
        let repo = SessionRepository::new(ExpiringCache::new(Duration::from_millis(50), cancel.clone()));

        repo.save_session(session("old", -1));
        tokio::time::sleep(Duration::from_millis(120)).await;

        assert!(matches!(repo.session_by_token("old"), Err(SessionError::NotFound)));
        assert_eq!(repo.stats().reaped, 1);
        cancel.cancel();
    }
}
