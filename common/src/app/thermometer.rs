//! Thermometer: ADT7420 reading shown as `XX.XXC` on the display.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::App;
use crate::adt7420::{Adt7420, Identity};
use crate::config::THERMOMETER_PERIOD_MS;
use crate::digits::Digits;
use crate::periph::SevenSegment;
use crate::segments::DisplayFrame;

/// Result of one successful thermometer iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureReport {
    /// Signed temperature, as read.
    pub celsius: f32,
    /// Digits shown (magnitude only).
    pub digits: Digits,
    pub frame: DisplayFrame,
}

pub struct Thermometer<I2C, S> {
    sensor: Adt7420<I2C>,
    display: S,
}

impl<I2C, S> Thermometer<I2C, S>
where
    I2C: I2c,
    S: SevenSegment,
{
    pub const fn new(
        sensor: Adt7420<I2C>,
        display: S,
    ) -> Self {
        Self { sensor, display }
    }

    /// Check the sensor's ID register. Call once before the loop.
    pub fn verify_sensor(&mut self) -> Result<Identity, I2C::Error> { self.sensor.verify() }

    pub fn display(&mut self) -> &mut S { &mut self.display }

    pub fn release(self) -> (Adt7420<I2C>, S) { (self.sensor, self.display) }
}

impl<I2C, S> App for Thermometer<I2C, S>
where
    I2C: I2c,
    S: SevenSegment,
{
    type Error = I2C::Error;
    type Report = TemperatureReport;

    const PERIOD_MS: u32 = THERMOMETER_PERIOD_MS;

    /// Read, split and render. A failed read shows dashes so a stale value
    /// is never left on the display.
    fn tick<D: DelayNs>(
        &mut self,
        _delay: &mut D,
    ) -> Result<TemperatureReport, I2C::Error> {
        let celsius = match self.sensor.read_celsius() {
            Ok(celsius) => celsius,
            Err(e) => {
                DisplayFrame::dashes().render(&mut self.display);
                return Err(e);
            },
        };

        let digits = Digits::from_magnitude(celsius);
        let frame = DisplayFrame::temperature(&digits);
        frame.render(&mut self.display);

        Ok(TemperatureReport { celsius, digits, frame })
    }

    fn shutdown(&mut self) { DisplayFrame::blank().render(&mut self.display); }
}

// =============================================================================
// Unit Tests
// =============================================================================
