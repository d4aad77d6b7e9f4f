//! Ultrasonic ranging core (RCWL-1601 / HC-SR04 class sensor).
//!
//! The core generates the trigger pulse, times the echo and converts it to
//! millimeters on its own; software starts it and collects the result.
//!
//! | reg | access | meaning |
//! |-----|--------|---------|
//! | 0   | W      | write 1 to start a measurement |
//! | 0   | R      | status, bit 0 busy |
//! | 1   | R      | echo pulse width, us (unused, the core converts it) |
//! | 2   | R      | distance, mm (`0xFFFF_FFFF` = no echo) |

use sensor_demos_common::DistanceSensor;

use crate::mmio::Registers;

const CONTROL_REG: usize = 0;
const DISTANCE_REG: usize = 2;

const START: u32 = 1;
const BUSY: u32 = 1 << 0;

pub struct UltrasonicCore<R> {
    regs: R,
}

impl<R: Registers> UltrasonicCore<R> {
    pub const fn new(regs: R) -> Self { Self { regs } }
}

impl<R: Registers> DistanceSensor for UltrasonicCore<R> {
    fn trigger(&mut self) { self.regs.write(CONTROL_REG, START); }

    fn is_busy(&mut self) -> bool { self.regs.read(CONTROL_REG) & BUSY != 0 }

    fn read_distance(&mut self) -> u32 { self.regs.read(DISTANCE_REG) }
}

// =============================================================================
// Unit Tests
// =============================================================================
