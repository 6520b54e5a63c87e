//! Request timestamps for KuCoin API authentication.
//!
//! KuCoin signs every private request over a millisecond timestamp that must be
//! within a few seconds of server time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing timestamps for authenticated requests.
pub trait TimestampProvider: Send + Sync {
    /// Milliseconds since the UNIX epoch to sign the next request with.
    fn timestamp_ms(&self) -> u64;
}

/// A timestamp provider based on the system clock that never goes backwards.
///
/// If the wall clock steps back, the last issued value is reused instead.
pub struct MonotonicTimestamp {
    last: AtomicU64,
}

impl MonotonicTimestamp {
    /// Create a new monotonic timestamp provider.
    pub fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    fn current_time_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

impl Default for MonotonicTimestamp {
    fn default() -> Self {
        Self::new()
    }
}

impl TimestampProvider for MonotonicTimestamp {
    fn timestamp_ms(&self) -> u64 {
        let now = Self::current_time_millis();
        let previous = self.last.fetch_max(now, Ordering::SeqCst);
        now.max(previous)
    }
}
