//! Theremin actuation: what to push to the tone generator and the LEDs.
//!
//! Planning is a pure function of the two sensor readings; applying the plan
//! to the peripherals happens in [`crate::app::Theremin`].
//!
//! # Invalid Readings
//!
//! - Volume without a distance: envelope forced to 0.0 (mute).
//! - Pitch without a distance: no frequency is written, so the generator
//!   keeps sounding the last pitch; the volume hand alone decides silence.
//!
//! In both cases the sensor's LED bar is dark.

use crate::config::{LED_BAR_SEGMENTS, LED_BAR_STEP_MM, PITCH_MAP, VOLUME_MAP};
use crate::ultrasonic::Reading;

/// Everything the theremin writes in one iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Actuation {
    /// New carrier frequency, or `None` to leave the generator's pitch alone.
    pub frequency: Option<u32>,
    /// Envelope in 0.0..=1.0.
    pub envelope: f32,
    /// Low byte: pitch bar, high byte: volume bar.
    pub leds: u16,
}

/// Bar-graph level for a distance: one LED per [`LED_BAR_STEP_MM`], at most
/// [`LED_BAR_SEGMENTS`].
#[inline]
pub const fn bar_level(distance_mm: u32) -> u32 {
    let level = distance_mm / LED_BAR_STEP_MM;
    if level > LED_BAR_SEGMENTS { LED_BAR_SEGMENTS } else { level }
}

/// Unary bar: the lowest `level` bits set.
#[inline]
pub const fn bar_bits(level: u32) -> u8 {
    if level >= 8 { 0xFF } else { ((1u16 << level) - 1) as u8 }
}

/// Combine both bars into the 16-bit LED word.
#[inline]
pub const fn led_pattern(
    pitch: Reading,
    volume: Reading,
) -> u16 {
    let low = match pitch.distance() {
        Some(mm) => bar_bits(bar_level(mm)),
        None => 0,
    };
    let high = match volume.distance() {
        Some(mm) => bar_bits(bar_level(mm)),
        None => 0,
    };
    ((high as u16) << 8) | low as u16
}

/// Decide the outputs for one pair of readings.
///
/// Only valid distances reach the maps; neither the sentinel nor a fault is
/// ever clamped or interpolated.
pub fn plan(
    pitch: Reading,
    volume: Reading,
) -> Actuation {
    let frequency = match pitch {
        Reading::Distance(mm) => Some(PITCH_MAP.map(mm)),
        Reading::NoEcho | Reading::Fault => None,
    };
    let envelope = match volume {
        Reading::Distance(mm) => VOLUME_MAP.map(mm),
        Reading::NoEcho | Reading::Fault => 0.0,
    };

    Actuation {
        frequency,
        envelope,
        leds: led_pattern(pitch, volume),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
