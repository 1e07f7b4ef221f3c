//! Error types for the session cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error ==
/// The only failure the expiring cache reports.
///
/// An absent key looks the same whether it was never inserted, already
/// redeemed, or reaped after expiry.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    #[error("element not found")]
    NotFound,
}

// == Session Error ==
/// Errors raised by the session repository and token manager.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Refresh token unknown, already used, or reaped
    #[error("session not found")]
    NotFound,

    /// Access token failed signature or expiry checks
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Token could not be produced
    #[error("token error: {0}")]
    Token(String),
}

// == Api Error ==
/// Error type rendered by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Refresh token does not map to a live session
    #[error("session not found")]
    SessionNotFound,

    /// Missing or rejected access token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound => ApiError::SessionNotFound,
            SessionError::InvalidToken(msg) => ApiError::Unauthorized(msg),
            SessionError::Token(msg) => ApiError::Internal(msg),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::SessionNotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let test_cases = vec![
            (ApiError::InvalidRequest("bad".to_string()), StatusCode::BAD_REQUEST),
            (ApiError::SessionNotFound, StatusCode::NOT_FOUND),
            (ApiError::Unauthorized("nope".to_string()), StatusCode::UNAUTHORIZED),
            (ApiError::Internal("error".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_session_error_conversion() {
        assert!(matches!(
            ApiError::from(SessionError::NotFound),
            ApiError::SessionNotFound
        ));
        assert!(matches!(
            ApiError::from(SessionError::InvalidToken("expired".into())),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(SessionError::Token("sign".into())),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn test_session_not_found_message() {
        assert_eq!(ApiError::SessionNotFound.to_string(), "session not found");
        assert_eq!(CacheError::NotFound.to_string(), "element not found");
    }
}
