//! Wall-Clock Timing
//!
//! A repetition is a full training run lasting seconds to minutes, so a
//! monotonic `std::time::Instant` is all the precision the runner needs.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Timer for measuring one train + evaluate cycle
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since start
    #[inline]
    pub fn stop(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time since start, in fractional seconds
    #[inline]
    pub fn stop_secs(&self) -> f64 {
        self.stop().as_secs_f64()
    }
}

/// Seed derived from the current wall-clock time.
///
/// Uses nanoseconds since the Unix epoch folded into 64 bits. Two calls within
/// the clock's resolution may return the same value; repetitions only need
/// non-repeating seeds in practice, not a guarantee.
pub fn clock_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    (nanos as u64) ^ ((nanos >> 64) as u64)
}
