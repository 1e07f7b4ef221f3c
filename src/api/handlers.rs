//! API Handlers
//!
//! HTTP request handlers for each session endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::cache::ExpiringCache;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    CreateSessionRequest, HealthResponse, RefreshRequest, StatsResponse, TokenPairResponse,
    WhoAmIResponse,
};
use crate::session::{JwtManager, SessionRepository, SessionService, UserRole};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionService>,
}

impl AppState {
    /// Creates a new AppState around an existing session service.
    pub fn new(sessions: SessionService) -> Self {
        Self {
            sessions: Arc::new(sessions),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the session cache, whose reaper runs until `shutdown` fires.
    pub fn from_config(config: &Config, shutdown: CancellationToken) -> Self {
        let cache = ExpiringCache::new(config.reap_interval, shutdown);
        let repository = SessionRepository::new(cache);
        let jwt = JwtManager::new(&config.jwt_secret, config.access_token_ttl);
        Self::new(SessionService::new(repository, jwt, config.refresh_token_ttl))
    }
}

/// Handler for POST /auth/sessions
///
/// Issues the first token pair for a user. The role is always `user`;
/// nothing in the request can raise it.
pub async fn create_session_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<TokenPairResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let pair = state.sessions.create_session(req.user_id, UserRole::User)?;

    Ok((StatusCode::CREATED, Json(pair.into())))
}

/// Handler for PUT /auth/refresh
///
/// Redeems a refresh token for a new token pair. Each refresh token works once.
pub async fn refresh_handler(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<(StatusCode, Json<TokenPairResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let pair = state.sessions.refresh(&req.refresh_token)?;

    Ok((StatusCode::CREATED, Json(pair.into())))
}

/// Handler for GET /auth/me
///
/// Returns the identity carried by the bearer access token.
pub async fn whoami_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<WhoAmIResponse>> {
    let token = bearer_token(&headers)?;
    let claims = state
        .sessions
        .validate_access(token)
        .inspect_err(|e| warn!(error = %e, "Rejected access token"))?;

    Ok(Json(claims.into()))
}

/// Handler for GET /stats
///
/// Returns session cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.sessions.repository().stats().into())
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.sessions.repository().is_reaping()))
}

fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("malformed authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("expected a bearer token".to_string()))
}
