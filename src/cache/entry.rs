//! Expiry Capability
//!
//! Values stored in an [`ExpiringCache`](super::ExpiringCache) report their
//! own expiry; the cache never computes one.

use chrono::{DateTime, Utc};

// == Expires ==
/// A value that knows when it stops being valid.
///
/// `expires_at` must be a pure accessor. The reaper calls it while holding
/// the cache's write lock, and a panic there takes the reaper down with it.
pub trait Expires {
    /// Instant after which the value may be reaped.
    fn expires_at(&self) -> DateTime<Utc>;

    /// Expired means strictly before `now`. A value expiring exactly at
    /// `now` survives the sweep.
    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at() < now
    }
}

impl Expires for DateTime<Utc> {
    fn expires_at(&self) -> DateTime<Utc> {
        *self
    }
}
