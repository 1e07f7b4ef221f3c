//! Expiring Cache Store
//!
//! Generic keyed store guarded by a single reader/writer lock, with a
//! background reaper that removes entries whose expiry has passed.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::cache::stats::StatsCounters;
use crate::cache::{CacheStats, Expires};
use crate::error::CacheError;
use crate::tasks::{spawn_reaper, Sweep, MIN_REAP_PERIOD};

// == Shared State ==
/// State shared between cache handles and the reaper.
struct Shared<K, V> {
    entries: RwLock<HashMap<K, V>>,
    stats: StatsCounters,
}

impl<K, V> Sweep for Shared<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Expires + Send + Sync + 'static,
{
    fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let removed = {
            let mut entries = self.entries.write();
            let before = entries.len();
            // expires_at runs under the write lock; it must be a pure accessor
            entries.retain(|_, value| !value.is_expired_at(now));
            before - entries.len()
        };
        self.stats.record_reaped(removed);
        removed
    }
}

// == Expiring Cache ==
/// Thread-safe key/value store whose values carry their own expiry.
///
/// Reads never look at expiry: a value past its deadline stays visible to
/// [`get`](Self::get) and [`get_with_delete`](Self::get_with_delete) until
/// the next reaper sweep removes it.
///
/// Handles are cheap to clone and all share the same map.
pub struct ExpiringCache<K, V> {
    shared: Arc<Shared<K, V>>,
    reaper: Arc<JoinHandle<()>>,
    period: Duration,
}

impl<K, V> Clone for ExpiringCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            reaper: Arc::clone(&self.reaper),
            period: self.period,
        }
    }
}

impl<K, V> fmt::Debug for ExpiringCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("entries", &self.shared.entries.read().len())
            .field("period", &self.period)
            .field("reaping", &!self.reaper.is_finished())
            .finish()
    }
}

impl<K, V> ExpiringCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Expires + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty cache and starts its reaper.
    ///
    /// The reaper sweeps every `period` until `cancel` fires or every handle
    /// to this cache has been dropped. Periods below [`MIN_REAP_PERIOD`] are
    /// raised to it.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime.
    pub fn new(period: Duration, cancel: CancellationToken) -> Self {
        let period = period.max(MIN_REAP_PERIOD);
        let shared = Arc::new(Shared {
            entries: RwLock::new(HashMap::new()),
            stats: StatsCounters::default(),
        });
        let reaper = spawn_reaper(Arc::downgrade(&shared), period, cancel);

        Self {
            shared,
            reaper: Arc::new(reaper),
            period,
        }
    }

    // == Put ==
    /// Inserts `value` under `key`, replacing any previous value.
    pub fn put(&self, key: K, value: V) {
        self.shared.entries.write().insert(key, value);
    }

    // == Get With Delete ==
    /// Removes the entry for `key` and returns it.
    ///
    /// Lookup and removal happen under one write lock, so among any number
    /// of concurrent callers exactly one receives a given stored value and
    /// the rest see `NotFound`.
    pub fn get_with_delete<Q>(&self, key: &Q) -> Result<V, CacheError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.shared.entries.write().remove(key);
        match removed {
            Some(value) => {
                self.shared.stats.record_hit();
                Ok(value)
            }
            None => {
                self.shared.stats.record_miss();
                Err(CacheError::NotFound)
            }
        }
    }

    // == Purge Expired ==
    /// Runs one sweep immediately and returns the number of entries removed.
    ///
    /// This is exactly what the reaper does on every tick.
    pub fn purge_expired(&self) -> usize {
        self.shared.purge_expired()
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        self.shared.stats.snapshot(self.len())
    }

    // == Length ==
    /// Returns the current number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.shared.entries.read().len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.shared.entries.read().is_empty()
    }

    /// Period between reaper sweeps.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether the background reaper is still running.
    pub fn is_reaping(&self) -> bool {
        !self.reaper.is_finished()
    }
}

impl<K, V> ExpiringCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Expires + Clone + Send + Sync + 'static,
{
    // == Get ==
    /// Returns a copy of the value stored under `key`.
    ///
    /// Expiry is not checked here; only the reaper enforces it.
    pub fn get<Q>(&self, key: &Q) -> Result<V, CacheError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let found = self.shared.entries.read().get(key).cloned();
        match found {
            Some(value) => {
                self.shared.stats.record_hit();
                Ok(value)
            }
            None => {
                self.shared.stats.record_miss();
                Err(CacheError::NotFound)
            }
        }
    }
}
