//! Centralized application configuration.
//!
//! All values are compile-time constants. Orderings are checked with `const`
//! assertions, and the two distance maps are built in `const` context: an
//! empty or inverted range fails the build instead of dividing by zero at
//! run time.

use crate::mapping::{EnvelopeMap, LinearMap, Slope};

// =============================================================================
// Thermometer
// =============================================================================

/// 7-bit I2C address of the ADT7420 (A0 and A1 strapped high).
pub const ADT7420_ADDRESS: u8 = 0x4B;

/// Value the ADT7420 ID register reads back.
pub const ADT7420_DEVICE_ID: u8 = 0xCB;

/// Thermometer update period (1 Hz).
pub const THERMOMETER_PERIOD_MS: u32 = 1000;

// =============================================================================
// Theremin: pitch (one full octave, D4 to D5)
// =============================================================================

/// Lowest note, played at the far end of the pitch range (D4).
pub const BASE_FREQ_HZ: u32 = 294;

/// Highest note, played with the hand closest to the sensor (D5).
pub const HIGH_FREQ_HZ: u32 = 587;

/// 2 inches: highest pitch.
pub const PITCH_MIN_DIST_MM: u32 = 51;

/// 8 inches: lowest pitch.
pub const PITCH_MAX_DIST_MM: u32 = 203;

const _: () = assert!(BASE_FREQ_HZ < HIGH_FREQ_HZ);
const _: () = assert!(PITCH_MIN_DIST_MM < PITCH_MAX_DIST_MM);

// =============================================================================
// Theremin: volume
// =============================================================================

/// Full volume at or below this distance.
pub const VOLUME_MIN_DIST_MM: u32 = 51;

/// Silence at or beyond this distance.
pub const VOLUME_MAX_DIST_MM: u32 = 203;

const _: () = assert!(VOLUME_MIN_DIST_MM < VOLUME_MAX_DIST_MM);

// =============================================================================
// Theremin: timing and LEDs
// =============================================================================

/// Theremin update period (20 Hz).
pub const THEREMIN_PERIOD_MS: u32 = 50;

/// All-LED flash on start-up.
pub const STARTUP_FLASH_MS: u32 = 500;

/// Distance covered by one lit LED in the bar graph.
pub const LED_BAR_STEP_MM: u32 = 25;

/// LEDs per bar (one byte of the LED bank per sensor).
pub const LED_BAR_SEGMENTS: u32 = 8;

const _: () = assert!(LED_BAR_STEP_MM > 0);
const _: () = assert!(LED_BAR_SEGMENTS <= 8);

/// Longest wait for the ultrasonic core to clear its busy flag.
///
/// The core's own echo timeout is ~38 ms, so a healthy sensor always
/// finishes well inside this budget.
pub const ECHO_TIMEOUT_US: u32 = 60_000;

/// Spacing between busy-flag polls.
pub const POLL_INTERVAL_US: u32 = 100;

const _: () = assert!(POLL_INTERVAL_US > 0);
const _: () = assert!(POLL_INTERVAL_US < ECHO_TIMEOUT_US);

// =============================================================================
// Distance maps
// =============================================================================

/// Hand distance to carrier frequency: near = high note.
pub const PITCH_MAP: LinearMap =
    match LinearMap::new(PITCH_MIN_DIST_MM, PITCH_MAX_DIST_MM, BASE_FREQ_HZ, HIGH_FREQ_HZ, Slope::Falling) {
        Ok(map) => map,
        Err(_) => panic!("invalid pitch map"),
    };

/// Hand distance to envelope: near = loud.
pub const VOLUME_MAP: EnvelopeMap =
    match EnvelopeMap::new(VOLUME_MIN_DIST_MM, VOLUME_MAX_DIST_MM, 0.0, 1.0, Slope::Falling) {
        Ok(map) => map,
        Err(_) => panic!("invalid volume map"),
    };

// =============================================================================
// Unit Tests
// =============================================================================
