//! Firmware library for the soft-SoC sensor demos.
//!
//! Register-level drivers for the cores behind the bus bridge, the UART
//! console and the slot map. The binaries in `src/bin/` wire these drivers
//! into the applications from `sensor-demos-common`.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p sensor-demos-soc --lib --target x86_64-unknown-linux-gnu
//! ```
//!
//! Drivers are generic over [`mmio::Registers`], so the tests run them
//! against a scripted fake register file instead of the bus.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
pub mod console;
pub mod cores;
pub mod mmio;

pub use mmio::{Registers, Slot};
