//! Distance measurement on top of an ultrasonic core.
//!
//! The core runs the trigger pulse, echo timing and millimeter conversion in
//! hardware; software triggers, waits for the busy flag to clear and reads
//! the result. The wait here is bounded: a core that never finishes is
//! reported as [`DistanceError::Timeout`] instead of hanging the loop.

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::config::POLL_INTERVAL_US;
use crate::periph::DistanceSensor;

/// Distance register value meaning "no echo received".
pub const NO_ECHO: u32 = 0xFFFF_FFFF;

/// Decoded distance register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Echo {
    /// Distance in millimeters.
    Distance(u32),
    /// The core timed out waiting for an echo (nothing in range).
    NoEcho,
}

impl Echo {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        if raw == NO_ECHO {
            Self::NoEcho
        } else {
            Self::Distance(raw)
        }
    }
}

/// Measurement did not complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DistanceError {
    /// Busy flag still set after the poll budget ran out.
    Timeout,
}

impl fmt::Display for DistanceError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("distance sensor did not finish"),
        }
    }
}

/// One sensor's outcome for a loop iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    /// Valid distance in millimeters (zero included).
    Distance(u32),
    /// Sensor reported the no-echo sentinel.
    NoEcho,
    /// Sensor never reported completion.
    Fault,
}

impl Reading {
    /// The distance, if this reading carries one.
    #[inline]
    pub const fn distance(self) -> Option<u32> {
        match self {
            Self::Distance(mm) => Some(mm),
            Self::NoEcho | Self::Fault => None,
        }
    }
}

impl From<Result<Echo, DistanceError>> for Reading {
    fn from(result: Result<Echo, DistanceError>) -> Self {
        match result {
            Ok(Echo::Distance(mm)) => Self::Distance(mm),
            Ok(Echo::NoEcho) => Self::NoEcho,
            Err(DistanceError::Timeout) => Self::Fault,
        }
    }
}

/// Trigger a measurement and wait for it, polling every
/// [`POLL_INTERVAL_US`] for at most `timeout_us`.
pub fn measure<S, D>(
    sensor: &mut S,
    delay: &mut D,
    timeout_us: u32,
) -> Result<Echo, DistanceError>
where
    S: DistanceSensor + ?Sized,
    D: DelayNs + ?Sized,
{
    sensor.trigger();

    let mut waited_us = 0u32;
    while sensor.is_busy() {
        if waited_us >= timeout_us {
            return Err(DistanceError::Timeout);
        }
        delay.delay_us(POLL_INTERVAL_US);
        waited_us = waited_us.saturating_add(POLL_INTERVAL_US);
    }

    Ok(Echo::from_raw(sensor.read_distance()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_hal_mock::eh1::delay::NoopDelay;

    use super::*;
    use crate::config::ECHO_TIMEOUT_US;
    use crate::fakes::{CountingDelay, FakeSensor};

    #[test]
    fn test_echo_from_raw() {
        assert_eq!(Echo::from_raw(NO_ECHO), Echo::NoEcho);
        assert_eq!(Echo::from_raw(0), Echo::Distance(0));
        assert_eq!(Echo::from_raw(NO_ECHO - 1), Echo::Distance(NO_ECHO - 1));
    }

    #[test]
    fn test_measure_waits_for_busy_to_clear() {
        let mut sensor = FakeSensor::new(120).busy_for(5);
        let mut delay = CountingDelay::new();

        assert_eq!(measure(&mut sensor, &mut delay, ECHO_TIMEOUT_US), Ok(Echo::Distance(120)));
        assert_eq!(sensor.triggers, 1);
        assert_eq!(delay.calls, 5);
        assert_eq!(delay.total_ns, 5 * u64::from(POLL_INTERVAL_US) * 1_000);
    }

    #[test]
    fn test_measure_ready_immediately() {
        let mut sensor = FakeSensor::new(51);
        let mut delay = CountingDelay::new();

        assert_eq!(measure(&mut sensor, &mut delay, ECHO_TIMEOUT_US), Ok(Echo::Distance(51)));
        assert_eq!(delay.total_ns, 0);
    }

    #[test]
    fn test_measure_reports_no_echo() {
        let mut sensor = FakeSensor::new(NO_ECHO).busy_for(2);
        assert_eq!(measure(&mut sensor, &mut NoopDelay, ECHO_TIMEOUT_US), Ok(Echo::NoEcho));
    }

    #[test]
    fn test_measure_times_out_on_stuck_sensor() {
        let mut sensor = FakeSensor::new(100).busy_forever();
        let mut delay = CountingDelay::new();

        assert_eq!(measure(&mut sensor, &mut delay, 1_000), Err(DistanceError::Timeout));
        // 1000 us budget at 100 us per poll
        assert_eq!(delay.total_ns, 1_000_000);
        assert_eq!(sensor.distance_reads, 0);
    }

    #[test]
    fn test_zero_distance_distinct_from_fault() {
        let mut ok = FakeSensor::new(0);
        let mut stuck = FakeSensor::new(0).busy_forever();
        let mut delay = NoopDelay;

        let valid = Reading::from(measure(&mut ok, &mut delay, 500));
        let fault = Reading::from(measure(&mut stuck, &mut delay, 500));

        assert_eq!(valid, Reading::Distance(0));
        assert_eq!(valid.distance(), Some(0));
        assert_eq!(fault, Reading::Fault);
        assert_eq!(fault.distance(), None);
    }

    #[test]
    fn test_reading_from_result() {
        assert_eq!(Reading::from(Ok(Echo::Distance(7))), Reading::Distance(7));
        assert_eq!(Reading::from(Ok(Echo::NoEcho)), Reading::NoEcho);
        assert_eq!(Reading::from(Err(DistanceError::Timeout)), Reading::Fault);
    }
}
