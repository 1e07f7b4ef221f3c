//! API Module
//!
//! HTTP handlers and routing for the session REST API.
//!
//! # Endpoints
//! - `POST /auth/sessions` - Issue a token pair for a user
//! - `PUT /auth/refresh` - Trade a refresh token for a new pair
//! - `GET /auth/me` - Identity behind a bearer access token
//! - `GET /stats` - Session cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
