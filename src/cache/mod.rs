//! Cache Module
//!
//! Generic in-memory cache whose values report their own expiry, swept by a
//! periodic background reaper.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::Expires;
pub use stats::CacheStats;
pub use store::ExpiringCache;
