//! Eight-digit seven-segment display core.
//!
//! The core scans the digits itself; software only keeps the two data
//! registers up to date. Byte `i` of register 0 drives position `i`
//! (0-3), byte `i` of register 1 drives position `4 + i`. Bit 7 of each
//! byte is the active-low decimal point.

use sensor_demos_common::SevenSegment;
use sensor_demos_common::segments::{BLANK, POSITIONS, hex_pattern};

use crate::mmio::Registers;

const DATA_LOW_REG: usize = 0;
const DATA_HIGH_REG: usize = 1;

const DP_BIT: u8 = 0x80;

pub struct SsegCore<R> {
    regs: R,
    patterns: [u8; POSITIONS],
    dp_mask: u8,
}

impl<R: Registers> SsegCore<R> {
    /// Take the core and blank every digit.
    pub fn new(regs: R) -> Self {
        let mut sseg = Self {
            regs,
            patterns: [BLANK; POSITIONS],
            dp_mask: 0,
        };
        sseg.flush();
        sseg
    }

    /// Pattern for a hex digit, for callers that build frames by hand.
    #[inline]
    pub const fn h2s(digit: u8) -> u8 { hex_pattern(digit) }

    /// Pack four positions into one register word, merging decimal points.
    fn pack(
        &self,
        first: usize,
    ) -> u32 {
        let mut word = 0u32;
        for i in 0..4 {
            let position = first + i;
            let mut byte = self.patterns[position] | DP_BIT;
            if self.dp_mask & (1 << position) != 0 {
                byte &= !DP_BIT;
            }
            word |= u32::from(byte) << (8 * i);
        }
        word
    }

    fn flush(&mut self) {
        let low = self.pack(0);
        let high = self.pack(4);
        self.regs.write(DATA_LOW_REG, low);
        self.regs.write(DATA_HIGH_REG, high);
    }

    fn flush_position(
        &mut self,
        position: usize,
    ) {
        if position < 4 {
            let low = self.pack(0);
            self.regs.write(DATA_LOW_REG, low);
        } else {
            let high = self.pack(4);
            self.regs.write(DATA_HIGH_REG, high);
        }
    }
}

impl<R: Registers> SevenSegment for SsegCore<R> {
    /// Out-of-range positions are ignored.
    fn write_pattern(
        &mut self,
        pattern: u8,
        position: usize,
    ) {
        if position >= POSITIONS {
            return;
        }
        self.patterns[position] = pattern;
        self.flush_position(position);
    }

    fn set_decimal_points(
        &mut self,
        mask: u8,
    ) {
        self.dp_mask = mask;
        self.flush();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
