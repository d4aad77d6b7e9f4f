//! Shared logic for the soft-SoC sensor demos.
//!
//! This crate contains everything that does not touch a register, so it can be
//! tested on the host and reused by both the firmware and the simulator:
//!
//! - [`adt7420`]: temperature register decoding and I2C driver
//! - [`mapping`]: clamped linear maps (distance to pitch / volume)
//! - [`digits`]: two-decimal digit splitting
//! - [`segments`]: seven-segment patterns and the display frame
//! - [`ultrasonic`]: bounded distance measurement
//! - [`theremin`]: LED bar graph and per-iteration actuation plan
//! - [`periph`]: capability traits implemented by each peripheral core
//! - [`app`]: the two applications and the polling loop
//! - [`config`]: compile-time tuning constants
//!
//! # Testing
//!
//! ```bash
//! cargo test -p sensor-demos-common
//! ```
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` outside of tests. Enable the `defmt` feature to
//! derive `defmt::Format` on the public types.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

pub mod adt7420;
pub mod app;
pub mod config;
pub mod digits;
pub mod mapping;
pub mod periph;
pub mod segments;
pub mod theremin;
pub mod ultrasonic;

#[cfg(test)]
mod fakes;

// Re-export commonly used items
pub use app::{App, Shutdown, Thermometer, Theremin, run};
pub use digits::Digits;
pub use mapping::{ConfigError, EnvelopeMap, InputRange, LinearMap, Slope};
pub use periph::{DistanceSensor, LedBank, SevenSegment, ToneGenerator};
pub use segments::DisplayFrame;
pub use ultrasonic::{DistanceError, Echo, Reading};
