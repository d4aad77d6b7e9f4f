//! UART core used as the text console.
//!
//! | reg | access | meaning |
//! |-----|--------|---------|
//! | 0   | R      | rx data 7:0, bit 8 rx empty, bit 9 tx full |
//! | 1   | W      | baud divisor, `clk / 16 / baud - 1` |
//! | 2   | W      | tx data (push into the tx FIFO) |

use core::fmt;

use crate::config::SYS_CLK_HZ;
use crate::mmio::Registers;

const STATUS_REG: usize = 0;
const DVSR_REG: usize = 1;
const WR_DATA_REG: usize = 2;

const TX_FULL: u32 = 1 << 9;

/// Divisor register value for `baud` at the system clock.
#[inline]
pub const fn baud_divisor(baud: u32) -> u32 { SYS_CLK_HZ / 16 / baud - 1 }

pub struct UartCore<R> {
    regs: R,
}

impl<R: Registers> UartCore<R> {
    pub fn new(
        regs: R,
        baud: u32,
    ) -> Self {
        let mut uart = Self { regs };
        uart.set_baud_rate(baud);
        uart
    }

    pub fn set_baud_rate(
        &mut self,
        baud: u32,
    ) {
        self.regs.write(DVSR_REG, baud_divisor(baud));
    }

    pub fn tx_full(&mut self) -> bool { self.regs.read(STATUS_REG) & TX_FULL != 0 }

    /// Queue one byte, waiting while the tx FIFO is full.
    pub fn write_byte(
        &mut self,
        byte: u8,
    ) {
        while self.tx_full() {}
        self.regs.write(WR_DATA_REG, u32::from(byte));
    }

    pub fn write_bytes(
        &mut self,
        bytes: &[u8],
    ) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }
}

impl<R: Registers> fmt::Write for UartCore<R> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
