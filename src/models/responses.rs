//! Response DTOs for the session API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::cache::CacheStats;
use crate::session::{AccessClaims, TokenPair, UserRole};

/// Response body for session creation and refresh
#[derive(Debug, Clone, Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

/// Response body for GET /auth/me
#[derive(Debug, Clone, Serialize)]
pub struct WhoAmIResponse {
    pub user_id: Uuid,
    pub role: UserRole,
    /// Access token expiry
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<AccessClaims> for WhoAmIResponse {
    fn from(claims: AccessClaims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
            expires_at: DateTime::from_timestamp(claims.exp, 0),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Successful session lookups
    pub hits: u64,
    /// Lookups for unknown, spent, or reaped tokens
    pub misses: u64,
    /// Sessions removed by the reaper
    pub reaped: u64,
    /// Sessions currently stored
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            reaped: stats.reaped,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Whether the session reaper is still sweeping
    pub reaper_running: bool,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(reaper_running: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            reaper_running,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}
