//! 64-bit free-running cycle counter.
//!
//! | reg | access | meaning |
//! |-----|--------|---------|
//! | 0   | R      | counter bits 31:0 |
//! | 1   | R      | counter bits 63:32 |
//! | 2   | W      | control: bit 0 go, bit 1 clear |
//!
//! The two counter words are separate bus reads, so a read can straddle a
//! carry out of the low word; [`TimerCore::read_cycles`] retries until the
//! high word is stable.

use embedded_hal::delay::DelayNs;

use crate::config::SYS_CLK_HZ;
use crate::mmio::Registers;

const COUNTER_LOW_REG: usize = 0;
const COUNTER_HIGH_REG: usize = 1;
const CTRL_REG: usize = 2;

const CTRL_GO: u32 = 1 << 0;

const CYCLES_PER_US: u64 = (SYS_CLK_HZ / 1_000_000) as u64;

/// Cycles needed to cover `ns` nanoseconds, rounded up.
#[inline]
pub const fn ns_to_cycles(ns: u32) -> u64 { (ns as u64 * CYCLES_PER_US).div_ceil(1_000) }

pub struct TimerCore<R> {
    regs: R,
    ctrl: u32,
}

impl<R: Registers> TimerCore<R> {
    /// Take the core and start counting.
    pub fn new(regs: R) -> Self {
        let mut timer = Self { regs, ctrl: 0 };
        timer.go();
        timer
    }

    pub fn go(&mut self) {
        self.ctrl |= CTRL_GO;
        self.regs.write(CTRL_REG, self.ctrl);
    }

    /// Read high, low, high; a changed high word means the low word wrapped
    /// in between, so read again.
    pub fn read_cycles(&mut self) -> u64 {
        let mut high = self.regs.read(COUNTER_HIGH_REG);
        loop {
            let low = self.regs.read(COUNTER_LOW_REG);
            let again = self.regs.read(COUNTER_HIGH_REG);
            if again == high {
                return (u64::from(high) << 32) | u64::from(low);
            }
            high = again;
        }
    }

    /// Microseconds since the counter started.
    pub fn read_time_us(&mut self) -> u64 { self.read_cycles() / CYCLES_PER_US }
}

impl<R: Registers> DelayNs for TimerCore<R> {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        let start = self.read_cycles();
        let cycles = ns_to_cycles(ns);
        while self.read_cycles().wrapping_sub(start) < cycles {}
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mmio::fake::FakeRegs;

    #[test]
    fn test_ns_to_cycles() {
        assert_eq!(ns_to_cycles(0), 0);
        assert_eq!(ns_to_cycles(10), 1);
        assert_eq!(ns_to_cycles(11), 2);
        assert_eq!(ns_to_cycles(1_000), 100);
        assert_eq!(ns_to_cycles(u32::MAX), 429_496_730);
    }

    #[test]
    fn test_new_starts_counter() {
        let timer = TimerCore::new(FakeRegs::new());
        assert_eq!(timer.regs.writes, vec![(CTRL_REG, CTRL_GO)]);
    }

    #[test]
    fn test_read_cycles_combines_words() {
        let mut regs = FakeRegs::new();
        regs.script(COUNTER_LOW_REG, &[0x0000_0010]);
        regs.script(COUNTER_HIGH_REG, &[0x0000_0002, 0x0000_0002]);
        let mut timer = TimerCore::new(regs);

        assert_eq!(timer.read_cycles(), 0x2_0000_0010);
    }

    #[test]
    fn test_read_cycles_across_low_word_wrap() {
        let mut regs = FakeRegs::new();
        // The low word wraps between the first high read and the low read
        regs.script(COUNTER_HIGH_REG, &[0x0000_0002, 0x0000_0003, 0x0000_0003]);
        regs.script(COUNTER_LOW_REG, &[0x0000_0004, 0x0000_0009]);
        let mut timer = TimerCore::new(regs);

        assert_eq!(timer.read_cycles(), 0x3_0000_0009);
    }

    #[test]
    fn test_delay_not_cut_short_by_wrap() {
        let mut regs = FakeRegs::new();
        // start at 0x1_FFFF_FFF0; the second poll straddles the carry, and a
        // torn read would see 0x1_0000_0002 and wrap the elapsed count
        regs.script(COUNTER_HIGH_REG, &[1, 1, 1, 1, 1, 2, 2, 2, 2]);
        regs.script(COUNTER_LOW_REG, &[0xFFFF_FFF0, 0xFFFF_FFFA, 0x0000_0002, 0x0000_0100]);
        let mut timer = TimerCore::new(regs);

        timer.delay_us(2);

        let low_reads = timer.regs.reads.iter().filter(|&&o| o == COUNTER_LOW_REG).count();
        assert_eq!(low_reads, 4);
    }

    #[test]
    fn test_read_time_us() {
        let mut regs = FakeRegs::new();
        regs.script(COUNTER_LOW_REG, &[250_000]);
        let mut timer = TimerCore::new(regs);

        assert_eq!(timer.read_time_us(), 2_500);
    }

    #[test]
    fn test_delay_polls_until_elapsed() {
        let mut regs = FakeRegs::new();
        // start, then three polls; 1 us = 100 cycles
        regs.script(COUNTER_LOW_REG, &[1_000, 1_050, 1_099, 1_100, 5_000]);
        let mut timer = TimerCore::new(regs);

        timer.delay_us(1);

        let low_reads = timer.regs.reads.iter().filter(|&&o| o == COUNTER_LOW_REG).count();
        assert_eq!(low_reads, 4);
    }
}
