//! Delay source for the simulator.
//!
//! `std::thread::sleep` is not available in `no_std`, so the host delay
//! lives here rather than in the common crate.

use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;

/// Sleeps for real, or only keeps count when running fast.
#[derive(Debug, Default)]
pub struct StdDelay {
    fast: bool,
    /// Simulated time requested so far.
    elapsed: Duration,
}

impl StdDelay {
    pub fn new(fast: bool) -> Self {
        Self {
            fast,
            elapsed: Duration::ZERO,
        }
    }

    pub fn elapsed(&self) -> Duration { self.elapsed }
}

impl DelayNs for StdDelay {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        let duration = Duration::from_nanos(u64::from(ns));
        self.elapsed += duration;
        if !self.fast {
            thread::sleep(duration);
        }
    }
}
