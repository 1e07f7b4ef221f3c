//! Session Cache - refresh-token sessions in an in-memory expiring cache
//!
//! Provides a generic expiring cache with a background reaper, and the
//! session store, token manager, and HTTP API built on top of it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod tasks;

pub use api::AppState;
pub use cache::{ExpiringCache, Expires};
pub use config::Config;
