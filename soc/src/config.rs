//! SoC memory map and clocking.
//!
//! Slot numbers follow the hardware build: each core sits in a fixed
//! 32-register slot behind the bus bridge.

use crate::console::LogLevel;

/// Base address of the MMIO bus bridge.
pub const BRIDGE_BASE: usize = 0xC000_0000;

/// 32-bit registers per slot.
pub const SLOT_REGS: usize = 32;

/// System clock driving every core (100 MHz).
pub const SYS_CLK_HZ: u32 = 100_000_000;

// =============================================================================
// Slot Map
// =============================================================================

pub const TIMER_SLOT: usize = 0;
pub const UART_SLOT: usize = 1;
pub const LED_SLOT: usize = 2;
pub const PITCH_SENSOR_SLOT: usize = 3;
pub const VOLUME_SENSOR_SLOT: usize = 4;
pub const DDFS_SLOT: usize = 5;
pub const SSEG_SLOT: usize = 8;
pub const I2C_SLOT: usize = 10;

const _: () = assert!(I2C_SLOT < 64);

// =============================================================================
// Bus Settings
// =============================================================================

/// I2C SCL frequency (standard mode).
pub const I2C_FREQ_HZ: u32 = 100_000;

/// Console baud rate.
pub const UART_BAUD: u32 = 9_600;

/// Lowest level written to the UART. Lines below it only reach defmt, since
/// the UART blocks for about 1 ms per byte at 9600 baud.
pub const CONSOLE_LEVEL: LogLevel = LogLevel::Info;

const _: () = assert!(SYS_CLK_HZ / 4 / I2C_FREQ_HZ > 0);
const _: () = assert!(SYS_CLK_HZ / 16 / UART_BAUD > 1);
