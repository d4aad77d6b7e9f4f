//! Register-level drivers, one per core in the slot map.
//!
//! Each driver owns a [`Registers`](crate::mmio::Registers) handle and
//! implements the matching capability trait from `sensor-demos-common` (or
//! `embedded-hal` for the timer and the I2C master).

pub mod ddfs;
pub mod gpo;
pub mod i2c;
pub mod sseg;
pub mod timer;
pub mod uart;
pub mod ultrasonic;

pub use ddfs::DdfsCore;
pub use gpo::GpoCore;
pub use i2c::{I2cCore, I2cError};
pub use sseg::SsegCore;
pub use timer::TimerCore;
pub use uart::UartCore;
pub use ultrasonic::UltrasonicCore;
