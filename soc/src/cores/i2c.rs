//! I2C master core.
//!
//! The core executes one bus command at a time; software waits for the
//! ready flag before each command.
//!
//! | reg | access | meaning |
//! |-----|--------|---------|
//! | 0   | W      | SCL divisor, `clk / 4 / freq` |
//! | 0   | R      | data 7:0, bit 8 ready, bit 9 ack (1 = NACK) |
//! | 1   | W      | command, `cmd << 8 \| data` |
//!
//! For a read command, data bit 0 set means "last byte": the master answers
//! with NACK so the slave releases the bus.

use core::fmt;

use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation, SevenBitAddress};

use crate::config::SYS_CLK_HZ;
use crate::mmio::Registers;

const DVSR_REG: usize = 0;
const STATUS_REG: usize = 0;
const CMD_REG: usize = 1;

const READY: u32 = 1 << 8;
const NACK: u32 = 1 << 9;

const START_CMD: u32 = 0;
const WR_CMD: u32 = 1;
const RD_CMD: u32 = 2;
const STOP_CMD: u32 = 3;
const RESTART_CMD: u32 = 4;

/// Divisor register value for an SCL frequency of `freq_hz`.
#[inline]
pub const fn scl_divisor(freq_hz: u32) -> u32 { SYS_CLK_HZ / 4 / freq_hz }

/// Address byte: 7-bit address plus the R/W bit (1 = read).
#[inline]
const fn address_byte(
    address: SevenBitAddress,
    read: bool,
) -> u8 {
    (address << 1) | read as u8
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum I2cError {
    NoAcknowledge(NoAcknowledgeSource),
}

impl fmt::Display for I2cError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::NoAcknowledge(source) => write!(f, "no acknowledge ({source})"),
        }
    }
}

impl i2c::Error for I2cError {
    fn kind(&self) -> ErrorKind {
        match *self {
            Self::NoAcknowledge(source) => ErrorKind::NoAcknowledge(source),
        }
    }
}

pub struct I2cCore<R> {
    regs: R,
}

impl<R: Registers> I2cCore<R> {
    pub fn new(
        regs: R,
        freq_hz: u32,
    ) -> Self {
        let mut i2c = Self { regs };
        i2c.set_freq(freq_hz);
        i2c
    }

    pub fn set_freq(
        &mut self,
        freq_hz: u32,
    ) {
        self.regs.write(DVSR_REG, scl_divisor(freq_hz));
    }

    /// Spin until the core accepts a command; returns the status word.
    fn wait_ready(&mut self) -> u32 {
        loop {
            let status = self.regs.read(STATUS_REG);
            if status & READY != 0 {
                return status;
            }
        }
    }

    fn command(
        &mut self,
        cmd: u32,
        data: u8,
    ) {
        self.wait_ready();
        self.regs.write(CMD_REG, (cmd << 8) | u32::from(data));
    }

    fn start(&mut self) { self.command(START_CMD, 0); }

    fn restart(&mut self) { self.command(RESTART_CMD, 0); }

    fn stop(&mut self) { self.command(STOP_CMD, 0); }

    /// Shift one byte out; `true` if the slave acknowledged it.
    fn write_byte(
        &mut self,
        byte: u8,
    ) -> bool {
        self.command(WR_CMD, byte);
        self.wait_ready() & NACK == 0
    }

    fn read_byte(
        &mut self,
        last: bool,
    ) -> u8 {
        self.command(RD_CMD, u8::from(last));
        (self.wait_ready() & 0xFF) as u8
    }

    fn run(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), I2cError> {
        let mut direction: Option<bool> = None;

        for i in 0..operations.len() {
            let is_read = matches!(operations[i], Operation::Read(_));
            let next_is_read = matches!(operations.get(i + 1), Some(Operation::Read(_)));

            // Consecutive operations in the same direction share one frame
            if direction != Some(is_read) {
                match direction {
                    None => self.start(),
                    Some(_) => self.restart(),
                }
                if !self.write_byte(address_byte(address, is_read)) {
                    return Err(I2cError::NoAcknowledge(NoAcknowledgeSource::Address));
                }
                direction = Some(is_read);
            }

            match &mut operations[i] {
                Operation::Write(bytes) => {
                    for &byte in bytes.iter() {
                        if !self.write_byte(byte) {
                            return Err(I2cError::NoAcknowledge(NoAcknowledgeSource::Data));
                        }
                    }
                },
                Operation::Read(buffer) => {
                    let len = buffer.len();
                    for (j, byte) in buffer.iter_mut().enumerate() {
                        *byte = self.read_byte(!next_is_read && j + 1 == len);
                    }
                },
            }
        }

        Ok(())
    }
}

impl<R: Registers> ErrorType for I2cCore<R> {
    type Error = I2cError;
}

impl<R: Registers> I2c for I2cCore<R> {
    /// START, address, data... with a repeated START on every direction
    /// change, and STOP at the end (also after a NACK).
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), I2cError> {
        if operations.is_empty() {
            return Ok(());
        }
        let result = self.run(address, operations);
        self.stop();
        result
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
