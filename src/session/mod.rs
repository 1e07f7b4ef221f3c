//! Session Module
//!
//! Refresh-token sessions backed by the expiring cache, plus the token
//! manager and service that issue and rotate them.

mod jwt;
mod model;
mod repository;
mod service;

pub use jwt::{AccessClaims, JwtManager, REFRESH_TOKEN_LEN};
pub use model::{Session, UserRole};
pub use repository::SessionRepository;
pub use service::{SessionService, TokenPair};
