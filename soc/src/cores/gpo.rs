//! General-purpose output core driving the 16 discrete LEDs.

use sensor_demos_common::LedBank;

use crate::mmio::Registers;

const DATA_REG: usize = 0;

pub struct GpoCore<R> {
    regs: R,
}

impl<R: Registers> GpoCore<R> {
    pub const fn new(regs: R) -> Self { Self { regs } }

    pub fn write_word(
        &mut self,
        bits: u32,
    ) {
        self.regs.write(DATA_REG, bits);
    }
}

impl<R: Registers> LedBank for GpoCore<R> {
    fn write(
        &mut self,
        bits: u16,
    ) {
        self.write_word(u32::from(bits));
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
