//! The two demo applications and the loop that drives them.
//!
//! Both applications are single-threaded polling loops: do one iteration of
//! work, report it, sleep for the application's period, repeat. There is no
//! interrupt handling and no shared state besides the [`Shutdown`] flag,
//! which any context (an observer, a button handler, the simulator) may set
//! to end the loop cleanly.

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;

mod thermometer;
mod theremin;

pub use thermometer::{TemperatureReport, Thermometer};
pub use theremin::{Theremin, ThereminReport};

/// One polling application.
pub trait App {
    /// What one successful iteration produced, for logging.
    type Report;
    /// Why an iteration failed. Failures are reported and the loop continues.
    type Error;

    /// Sleep between iterations.
    const PERIOD_MS: u32;

    /// Run one iteration. `delay` is available for bounded waits inside it.
    fn tick<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<Self::Report, Self::Error>;

    /// Leave the outputs in a quiet state (display blank, tone muted).
    fn shutdown(&mut self);
}

/// Request flag that ends [`run`] after the current iteration.
#[derive(Debug, Default)]
pub struct Shutdown(AtomicBool);

impl Shutdown {
    pub const fn new() -> Self { Self(AtomicBool::new(false)) }

    pub fn request(&self) { self.0.store(true, Ordering::Release); }

    pub fn is_requested(&self) -> bool { self.0.load(Ordering::Acquire) }
}

/// Drive `app` until `shutdown` is requested, handing every iteration's
/// result to `observe`.
///
/// The flag is checked before each iteration and again before sleeping, so
/// a request made by `observe` takes effect without another period of delay.
/// [`App::shutdown`] runs once on the way out. Returns the number of
/// iterations performed.
pub fn run<A, D, F>(
    app: &mut A,
    delay: &mut D,
    shutdown: &Shutdown,
    mut observe: F,
) -> u32
where
    A: App,
    D: DelayNs,
    F: FnMut(Result<A::Report, A::Error>),
{
    let mut iterations = 0u32;

    while !shutdown.is_requested() {
        let result = app.tick(delay);
        observe(result);
        iterations = iterations.wrapping_add(1);

        if shutdown.is_requested() {
            break;
        }
        delay.delay_ms(A::PERIOD_MS);
    }

    app.shutdown();
    iterations
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::CountingDelay;

    struct Counter {
        ticks: u32,
        fail_every: u32,
        shut_down: bool,
    }

    impl App for Counter {
        type Error = u32;
        type Report = u32;

        const PERIOD_MS: u32 = 10;

        fn tick<D: DelayNs>(
            &mut self,
            _delay: &mut D,
        ) -> Result<u32, u32> {
            self.ticks += 1;
            if self.fail_every != 0 && self.ticks % self.fail_every == 0 {
                Err(self.ticks)
            } else {
                Ok(self.ticks)
            }
        }

        fn shutdown(&mut self) { self.shut_down = true; }
    }

    fn counter(fail_every: u32) -> Counter {
        Counter {
            ticks: 0,
            fail_every,
            shut_down: false,
        }
    }

    #[test]
    fn test_pre_requested_shutdown_skips_loop() {
        let shutdown = Shutdown::new();
        shutdown.request();
        let mut app = counter(0);
        let mut delay = CountingDelay::new();

        let n = run(&mut app, &mut delay, &shutdown, |_| panic!("should not tick"));

        assert_eq!(n, 0);
        assert_eq!(app.ticks, 0);
        assert!(app.shut_down);
        assert_eq!(delay.total_ns, 0);
    }

    #[test]
    fn test_runs_until_observer_requests_shutdown() {
        let shutdown = Shutdown::new();
        let mut app = counter(0);
        let mut delay = CountingDelay::new();
        let mut seen = Vec::new();

        let n = run(&mut app, &mut delay, &shutdown, |result| {
            seen.push(result);
            if seen.len() == 3 {
                shutdown.request();
            }
        });

        assert_eq!(n, 3);
        assert_eq!(seen, vec![Ok(1), Ok(2), Ok(3)]);
        // No sleep after the final iteration
        assert_eq!(delay.total_ms(), 2 * 10);
        assert!(app.shut_down);
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let shutdown = Shutdown::new();
        let mut app = counter(2);
        let mut delay = CountingDelay::new();
        let mut errors = 0;

        let n = run(&mut app, &mut delay, &shutdown, |result| {
            if result.is_err() {
                errors += 1;
            }
            if errors == 3 {
                shutdown.request();
            }
        });

        assert_eq!(n, 6);
        assert_eq!(errors, 3);
    }

    #[test]
    fn test_shutdown_flag() {
        let shutdown = Shutdown::default();
        assert!(!shutdown.is_requested());
        shutdown.request();
        assert!(shutdown.is_requested());
    }
}
