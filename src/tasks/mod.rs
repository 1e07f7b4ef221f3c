//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry reaper: sweeps expired entries out of a cache at a fixed period

mod reaper;

pub use reaper::{spawn_reaper, Sweep, MIN_REAP_PERIOD};
