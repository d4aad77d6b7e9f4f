//! Register access for cores behind the bus bridge.
//!
//! Drivers are written against [`Registers`] so they can run on the real
//! bus ([`Slot`]) or against a scripted fake in tests.

use crate::config::SLOT_REGS;

/// Word-addressed register file of one core.
pub trait Registers {
    fn read(
        &mut self,
        offset: usize,
    ) -> u32;

    fn write(
        &mut self,
        offset: usize,
        value: u32,
    );
}

/// Byte address of `slot` behind the bridge at `bridge_base`.
#[inline]
pub const fn slot_address(
    bridge_base: usize,
    slot: usize,
) -> usize {
    bridge_base + slot * SLOT_REGS * 4
}

/// One memory-mapped slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    base: usize,
}

impl Slot {
    /// # Safety
    ///
    /// `bridge_base` must be the bus bridge of this SoC and `slot` must hold
    /// a core. Several handles to the same slot may exist; the caller keeps
    /// their accesses from interleaving in ways the core does not expect.
    pub const unsafe fn new(
        bridge_base: usize,
        slot: usize,
    ) -> Self {
        Self {
            base: slot_address(bridge_base, slot),
        }
    }

    #[inline]
    pub const fn address(&self) -> usize { self.base }

    #[inline]
    fn register(
        &self,
        offset: usize,
    ) -> *mut u32 {
        (self.base + (offset % SLOT_REGS) * 4) as *mut u32
    }
}

impl Registers for Slot {
    #[inline]
    fn read(
        &mut self,
        offset: usize,
    ) -> u32 {
        // SAFETY: `new` guarantees the slot is mapped; the offset is folded
        // into the slot's 32 words.
        unsafe { core::ptr::read_volatile(self.register(offset)) }
    }

    #[inline]
    fn write(
        &mut self,
        offset: usize,
        value: u32,
    ) {
        // SAFETY: as for `read`.
        unsafe { core::ptr::write_volatile(self.register(offset), value) }
    }
}

#[cfg(test)]
pub mod fake {
    //! Scripted register file for driver tests.

    use std::collections::VecDeque;

    use super::Registers;
    use crate::config::SLOT_REGS;

    #[derive(Debug)]
    pub struct FakeRegs {
        /// Current register values, returned when no read is scripted.
        pub regs: [u32; SLOT_REGS],
        /// Every write, in order.
        pub writes: Vec<(usize, u32)>,
        /// Every read offset, in order.
        pub reads: Vec<usize>,
        script: Vec<VecDeque<u32>>,
    }

    impl FakeRegs {
        pub fn new() -> Self {
            Self {
                regs: [0; SLOT_REGS],
                writes: Vec::new(),
                reads: Vec::new(),
                script: vec![VecDeque::new(); SLOT_REGS],
            }
        }

        /// Queue values for successive reads of `offset`.
        pub fn script(
            &mut self,
            offset: usize,
            values: &[u32],
        ) {
            self.script[offset].extend(values.iter().copied());
        }

        /// Writes made to `offset`, in order.
        pub fn writes_to(
            &self,
            offset: usize,
        ) -> Vec<u32> {
            self.writes.iter().filter(|(o, _)| *o == offset).map(|(_, v)| *v).collect()
        }
    }

    impl Registers for FakeRegs {
        fn read(
            &mut self,
            offset: usize,
        ) -> u32 {
            self.reads.push(offset);
            self.script[offset].pop_front().unwrap_or(self.regs[offset])
        }

        fn write(
            &mut self,
            offset: usize,
            value: u32,
        ) {
            self.writes.push((offset, value));
            self.regs[offset] = value;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BRIDGE_BASE, I2C_SLOT, SSEG_SLOT};

    #[test]
    fn test_slot_addresses() {
        assert_eq!(slot_address(BRIDGE_BASE, 0), 0xC000_0000);
        assert_eq!(slot_address(BRIDGE_BASE, 1), 0xC000_0080);
        assert_eq!(slot_address(BRIDGE_BASE, SSEG_SLOT), 0xC000_0400);
        assert_eq!(slot_address(BRIDGE_BASE, I2C_SLOT), 0xC000_0500);
    }

    #[test]
    fn test_slot_handle() {
        // Never dereferenced here
        let slot = unsafe { Slot::new(BRIDGE_BASE, 5) };
        assert_eq!(slot.address(), 0xC000_0280);
        assert_eq!(slot.register(3) as usize, 0xC000_028C);
        assert_eq!(slot.register(SLOT_REGS) as usize, slot.address());
    }
}
