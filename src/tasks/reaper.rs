//! Expiry Reaper Task
//!
//! Background task that periodically sweeps expired entries out of a cache.

use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Shortest period the reaper accepts; a zero period is raised to this.
pub const MIN_REAP_PERIOD: Duration = Duration::from_millis(1);

/// Something the reaper can sweep.
pub trait Sweep: Send + Sync + 'static {
    /// Removes every expired entry and returns how many were removed.
    fn purge_expired(&self) -> usize;
}

/// Spawns a background task that calls [`Sweep::purge_expired`] every `period`.
///
/// The first sweep happens one full period after spawning. The task holds
/// only a weak reference, so it never keeps its target alive. It stops when
/// `cancel` fires or when the target has been dropped, whichever comes
/// first, and never starts a sweep after observing cancellation.
///
/// A zero `period` is raised to [`MIN_REAP_PERIOD`].
///
/// # Panics
/// Must be called from within a Tokio runtime.
pub fn spawn_reaper<T: Sweep>(
    target: Weak<T>,
    period: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    let period = period.max(MIN_REAP_PERIOD);

    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(?period, "Starting expiry reaper");

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Expiry reaper cancelled");
                    break;
                }
                _ = ticker.tick() => {}
            }

            let Some(live) = target.upgrade() else {
                debug!("Reaper target dropped, stopping");
                break;
            };

            let removed = live.purge_expired();
            drop(live);

            if removed > 0 {
                info!(removed, "Reaper: removed expired entries");
            } else {
                debug!("Reaper: no expired entries found");
            }
        }
    })
}
