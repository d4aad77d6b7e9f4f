//! Direct digital frequency synthesizer core.
//!
//! | reg | access | meaning |
//! |-----|--------|---------|
//! | 0   | W      | carrier frequency control word |
//! | 1   | W      | offset frequency control word (FM) |
//! | 2   | W      | phase offset (PM) |
//! | 3   | W      | envelope, signed Q2.14 |
//! | 4   | W      | control: bit 0 envelope source (1 = register) |
//!
//! The phase accumulator is 30 bits wide, so a control word of
//! `hz * 2^30 / clk` produces `hz`.

use sensor_demos_common::ToneGenerator;

use crate::config::SYS_CLK_HZ;
use crate::mmio::Registers;

const FCCW_REG: usize = 0;
const FOCW_REG: usize = 1;
const PHA_REG: usize = 2;
const ENV_REG: usize = 3;
const CTRL_REG: usize = 4;

const PHASE_BITS: u32 = 30;
const ENV_ONE: f32 = 16_384.0;

/// Envelope comes from [`ENV_REG`] rather than an external source.
const CTRL_ENV_FROM_REG: u32 = 1 << 0;

/// Frequency control word for `hz`.
#[inline]
pub const fn frequency_word(hz: u32) -> u32 { (((hz as u64) << PHASE_BITS) / SYS_CLK_HZ as u64) as u32 }

/// Envelope register value: `env` in Q2.14, clamped to `-2.0..2.0`.
#[inline]
pub fn envelope_word(env: f32) -> u32 {
    let q = (env * ENV_ONE) as i32;
    q.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16 as u16 as u32
}

pub struct DdfsCore<R> {
    regs: R,
}

impl<R: Registers> DdfsCore<R> {
    pub const fn new(regs: R) -> Self { Self { regs } }

    /// Envelope from the register at full scale, no offset, no phase shift.
    pub fn init(&mut self) {
        self.regs.write(CTRL_REG, CTRL_ENV_FROM_REG);
        self.set_env(1.0);
        self.set_offset_freq(0);
        self.set_phase_degree(0);
    }

    pub fn set_carrier_freq(
        &mut self,
        hz: u32,
    ) {
        self.regs.write(FCCW_REG, frequency_word(hz));
    }

    pub fn set_offset_freq(
        &mut self,
        hz: u32,
    ) {
        self.regs.write(FOCW_REG, frequency_word(hz));
    }

    /// Phase offset in whole degrees (0..360).
    pub fn set_phase_degree(
        &mut self,
        degrees: u32,
    ) {
        let word = ((u64::from(degrees % 360)) << PHASE_BITS) / 360;
        self.regs.write(PHA_REG, word as u32);
    }

    pub fn set_env(
        &mut self,
        env: f32,
    ) {
        self.regs.write(ENV_REG, envelope_word(env));
    }
}

impl<R: Registers> ToneGenerator for DdfsCore<R> {
    fn set_carrier_freq(
        &mut self,
        hz: u32,
    ) {
        DdfsCore::set_carrier_freq(self, hz);
    }

    fn set_envelope(
        &mut self,
        envelope: f32,
    ) {
        self.set_env(envelope);
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
    fn test_frequency_word() {
        assert_eq!(frequency_word(0), 0);
        assert_eq!(frequency_word(440), 4_724);
        assert_eq!(frequency_word(294), 3_156);
        assert_eq!(frequency_word(587), 6_302);
    }

    #[test]
    fn test_envelope_word() {
        assert_eq!(envelope_word(1.0), 0x4000);
        assert_eq!(envelope_word(0.5), 0x2000);
        assert_eq!(envelope_word(0.0), 0);
        assert_eq!(envelope_word(-1.0), 0xC000);
        // Saturates instead of wrapping
        assert_eq!(envelope_word(5.0), 0x7FFF);
    }

    #[test]
    fn test_init_sequence() {
        let mut ddfs = DdfsCore::new(FakeRegs::new());
        ddfs.init();
        assert_eq!(
            ddfs.regs.writes,
            vec![(CTRL_REG, CTRL_ENV_FROM_REG), (ENV_REG, 0x4000), (FOCW_REG, 0), (PHA_REG, 0)]
        );
    }

    #[test]
    fn test_phase_degree() {
        let mut ddfs = DdfsCore::new(FakeRegs::new());
        ddfs.set_phase_degree(90);
        ddfs.set_phase_degree(450);
        assert_eq!(ddfs.regs.writes_to(PHA_REG), vec![1 << 28, 1 << 28]);
    }

    #[test]
    fn test_tone_generator() {
        let mut ddfs = DdfsCore::new(FakeRegs::new());
        let tone: &mut dyn ToneGenerator = &mut ddfs;
        tone.set_carrier_freq(440);
        tone.set_envelope(0.0);
        assert_eq!(ddfs.regs.writes, vec![(FCCW_REG, 4_724), (ENV_REG, 0)]);
    }
}
