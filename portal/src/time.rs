//! Time source abstraction for token expiry checks.
//!
//! The session gate compares token expiry against "now". Routing that
//! through a `TimeSource` lets tests pin the clock to an exact instant,
//! which matters for the expiry boundary.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Abstraction over the current time.
pub trait TimeSource: Send + Sync {
    /// Get the current time in milliseconds since Unix epoch.
    fn now_ms(&self) -> u64;
}

/// Real time source using system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    #[allow(clippy::cast_possible_truncation)] // Milliseconds won't overflow u64 for billions of years
    fn now_ms(&self) -> u64 {
        // A clock before 1970 reads as the epoch instead of panicking.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_millis() as u64)
    }
}

/// A manually driven time source.
///
/// Time only moves when told to. Safe to share across the server's
/// worker threads, so end-to-end tests can hand it to the router and
/// still move it from the test body.
#[derive(Debug)]
pub struct FixedTimeSource {
    current_time_ms: AtomicU64,
}

impl FixedTimeSource {
    /// Create a time source frozen at `initial_time_ms`.
    #[must_use]
    pub const fn new(initial_time_ms: u64) -> Self {
        Self {
            current_time_ms: AtomicU64::new(initial_time_ms),
        }
    }

    /// Advance time by the given number of milliseconds, saturating at `u64::MAX`.
    pub fn advance(&self, ms: u64) {
        let _ = self
            .current_time_ms
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                Some(current.saturating_add(ms))
            });
    }

    /// Set the current time to a specific value.
    pub fn set(&self, time_ms: u64) {
        self.current_time_ms.store(time_ms, Ordering::SeqCst);
    }
}

impl TimeSource for FixedTimeSource {
    fn now_ms(&self) -> u64 {
        self.current_time_ms.load(Ordering::SeqCst)
    }
}
