//! Request DTOs for the session API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use uuid::Uuid;

use crate::session::REFRESH_TOKEN_LEN;

/// Request body for POST /auth/sessions
///
/// Carries no role: sessions issued here are always `user` sessions.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    /// The user the session is issued for
    pub user_id: Uuid,
}

impl CreateSessionRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.user_id.is_nil() {
            return Some("user_id cannot be the nil UUID".to_string());
        }
        None
    }
}

/// Request body for PUT /auth/refresh
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

impl RefreshRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.refresh_token.is_empty() {
            return Some("refresh_token cannot be empty".to_string());
        }
        if self.refresh_token.len() != REFRESH_TOKEN_LEN
            || !self.refresh_token.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Some(format!(
                "refresh_token must be {} hex characters",
                REFRESH_TOKEN_LEN
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_session_request_deserialize() {
        let json = r#"{"user_id": "67e55044-10b1-426f-9247-bb680e5fe0c8"}"#;
        let req: CreateSessionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.user_id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_create_session_request_ignores_role() {
        let json = r#"{"user_id": "67e55044-10b1-426f-9247-bb680e5fe0c8", "role": "admin"}"#;
        let req: CreateSessionRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_validate_nil_user() {
        let req = CreateSessionRequest { user_id: Uuid::nil() };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_refresh_token_shape() {
        let valid = RefreshRequest {
            refresh_token: "ab".repeat(REFRESH_TOKEN_LEN / 2),
        };
        assert!(valid.validate().is_none());

        let not_hex = "zz".repeat(REFRESH_TOKEN_LEN / 2);
        for bad in ["", "abc", not_hex.as_str()] {
            let req = RefreshRequest {
                refresh_token: bad.to_string(),
            };
            assert!(req.validate().is_some(), "{:?} should be rejected", bad);
        }
    }
}
