//! ADT7420 temperature sensor.
//!
//! The sensor reports temperature as a 13-bit two's-complement value in bits
//! 15:3 of a big-endian register pair starting at register `0x00`, with a
//! resolution of 1/16 °C. Bits 2:0 are status flags and are discarded.
//!
//! The driver is generic over [`embedded_hal::i2c::I2c`]. Each register read
//! is one `write_read`: the register pointer is written, then the bus
//! switches to reading after a repeated start, without an intervening stop.

use embedded_hal::i2c::I2c;

use crate::config::{ADT7420_ADDRESS, ADT7420_DEVICE_ID};

/// Temperature MSB register (LSB follows at `0x01`).
pub const TEMP_MSB_REG: u8 = 0x00;

/// Device ID register.
pub const ID_REG: u8 = 0x0B;

const SIGN_BIT: u16 = 0x8000;

/// 2^13: offset that sign-extends the 13-bit field.
const SIGN_OFFSET: i32 = 8192;

const LSB_PER_DEGREE: f32 = 16.0;

/// Convert the raw temperature register pair to °C.
///
/// `0x0190` → `0x32` → 50 / 16 = 3.125 °C.
pub fn decode_temperature(raw: u16) -> f32 {
    let field = i32::from(raw >> 3);
    if raw & SIGN_BIT != 0 {
        (field - SIGN_OFFSET) as f32 / LSB_PER_DEGREE
    } else {
        field as f32 / LSB_PER_DEGREE
    }
}

/// Outcome of the device-ID check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Identity {
    /// ID register reads [`ADT7420_DEVICE_ID`].
    Matched,
    /// Something answered, but with this ID.
    Mismatch(u8),
}

impl Identity {
    #[inline]
    pub const fn is_match(self) -> bool { matches!(self, Self::Matched) }
}

/// ADT7420 on an I2C bus.
pub struct Adt7420<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Adt7420<I2C> {
    /// Sensor at the default address (`0x4B`).
    pub const fn new(i2c: I2C) -> Self { Self::with_address(i2c, ADT7420_ADDRESS) }

    pub const fn with_address(
        i2c: I2C,
        address: u8,
    ) -> Self {
        Self { i2c, address }
    }

    #[inline]
    pub const fn address(&self) -> u8 { self.address }

    /// Give back the bus.
    pub fn release(self) -> I2C { self.i2c }
}

impl<I2C: I2c> Adt7420<I2C> {
    /// Read the ID register.
    pub fn device_id(&mut self) -> Result<u8, I2C::Error> {
        let mut id = [0u8; 1];
        self.i2c.write_read(self.address, &[ID_REG], &mut id)?;
        Ok(id[0])
    }

    /// Compare the ID register against the expected constant.
    ///
    /// A mismatch is not an error: callers report it and keep going.
    pub fn verify(&mut self) -> Result<Identity, I2C::Error> {
        let id = self.device_id()?;
        if id == ADT7420_DEVICE_ID {
            Ok(Identity::Matched)
        } else {
            Ok(Identity::Mismatch(id))
        }
    }

    /// Read the raw temperature register pair (MSB first).
    pub fn read_raw(&mut self) -> Result<u16, I2C::Error> {
        let mut bytes = [0u8; 2];
        self.i2c.write_read(self.address, &[TEMP_MSB_REG], &mut bytes)?;
        Ok(u16::from_be_bytes(bytes))
    }

    /// Read the temperature in °C.
    pub fn read_celsius(&mut self) -> Result<f32, I2C::Error> { self.read_raw().map(decode_temperature) }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use super::*;

    #[test]
    fn test_decode_positive() {
        assert_eq!(decode_temperature(0x0190), 3.125);
        assert_eq!(decode_temperature(0x0000), 0.0);
        // 25 °C = 400 LSB
        assert_eq!(decode_temperature(400 << 3), 25.0);
        // Status bits are ignored
        assert_eq!(decode_temperature(0x0197), 3.125);
    }

    #[test]
    fn test_decode_negative() {
        // All ones in the 13-bit field = -1 LSB
        assert_eq!(decode_temperature(0xFFF8), -0.0625);
        // -40 °C = -640 LSB = 8192 - 640 = 0x1D80
        assert_eq!(decode_temperature(0x1D80 << 3), -40.0);
        // Most negative field value
        assert_eq!(decode_temperature(0x8000), -256.0);
    }

    #[test]
    fn test_decode_matches_formula_for_every_word() {
        for raw in 0..=u16::MAX {
            let field = i32::from(raw >> 3);
            let expected = if raw & 0x8000 != 0 {
                (field - 8192) as f32 / 16.0
            } else {
                field as f32 / 16.0
            };
            assert_eq!(decode_temperature(raw), expected, "raw = {raw:#06x}");
        }
    }

    #[test]
    fn test_read_celsius() {
        let expectations = [I2cTransaction::write_read(0x4B, vec![TEMP_MSB_REG], vec![0x01, 0x90])];
        let mut sensor = Adt7420::new(I2cMock::new(&expectations));

        assert_eq!(sensor.read_celsius(), Ok(3.125));

        sensor.release().done();
    }

    #[test]
    fn test_verify_matched() {
        let expectations = [I2cTransaction::write_read(0x4B, vec![ID_REG], vec![0xCB])];
        let mut sensor = Adt7420::new(I2cMock::new(&expectations));

        let identity = sensor.verify().unwrap();
        assert_eq!(identity, Identity::Matched);
        assert!(identity.is_match());

        sensor.release().done();
    }

    #[test]
    fn test_verify_mismatch_is_not_an_error() {
        let expectations = [I2cTransaction::write_read(0x48, vec![ID_REG], vec![0x00])];
        let mut sensor = Adt7420::with_address(I2cMock::new(&expectations), 0x48);

        assert_eq!(sensor.verify(), Ok(Identity::Mismatch(0x00)));

        sensor.release().done();
    }

    #[test]
    fn test_bus_error_propagates() {
        let expectations =
            [I2cTransaction::write_read(0x4B, vec![TEMP_MSB_REG], vec![0x00, 0x00]).with_error(ErrorKind::Other)];
        let mut sensor = Adt7420::new(I2cMock::new(&expectations));

        assert_eq!(sensor.read_celsius(), Err(ErrorKind::Other));

        sensor.release().done();
    }
}
