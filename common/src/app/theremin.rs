//! Theremin: two distance sensors drive the tone generator and the LEDs.
//!
//! The pitch sensor sets the carrier frequency, the volume sensor sets the
//! envelope, and each sensor lights one byte of the LED bank as a bar graph.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;

use super::App;
use crate::config::{ECHO_TIMEOUT_US, STARTUP_FLASH_MS, THEREMIN_PERIOD_MS};
use crate::periph::{DistanceSensor, LedBank, ToneGenerator};
use crate::theremin::{Actuation, plan};
use crate::ultrasonic::{Reading, measure};

/// Result of one theremin iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThereminReport {
    pub pitch: Reading,
    pub volume: Reading,
    pub actuation: Actuation,
}

pub struct Theremin<P, V, T, L> {
    pitch: P,
    volume: V,
    tone: T,
    leds: L,
    echo_timeout_us: u32,
}

impl<P, V, T, L> Theremin<P, V, T, L>
where
    P: DistanceSensor,
    V: DistanceSensor,
    T: ToneGenerator,
    L: LedBank,
{
    pub const fn new(
        pitch: P,
        volume: V,
        tone: T,
        leds: L,
    ) -> Self {
        Self {
            pitch,
            volume,
            tone,
            leds,
            echo_timeout_us: ECHO_TIMEOUT_US,
        }
    }

    /// Override the per-sensor busy-wait budget.
    pub fn with_echo_timeout(
        mut self,
        timeout_us: u32,
    ) -> Self {
        self.echo_timeout_us = timeout_us;
        self
    }

    /// Flash every LED once so a dead bank is obvious at power-up.
    pub fn startup<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) {
        self.leds.write(0xFFFF);
        delay.delay_ms(STARTUP_FLASH_MS);
        self.leds.write(0x0000);
    }

    pub fn tone(&mut self) -> &mut T { &mut self.tone }

    pub fn leds(&mut self) -> &mut L { &mut self.leds }

    pub fn release(self) -> (P, V, T, L) { (self.pitch, self.volume, self.tone, self.leds) }

    fn apply(
        &mut self,
        actuation: &Actuation,
    ) {
        if let Some(hz) = actuation.frequency {
            self.tone.set_carrier_freq(hz);
        }
        self.tone.set_envelope(actuation.envelope);
        self.leds.write(actuation.leds);
    }
}

impl<P, V, T, L> App for Theremin<P, V, T, L>
where
    P: DistanceSensor,
    V: DistanceSensor,
    T: ToneGenerator,
    L: LedBank,
{
    /// Sensor problems are part of the report, never an error.
    type Error = Infallible;
    type Report = ThereminReport;

    const PERIOD_MS: u32 = THEREMIN_PERIOD_MS;

    fn tick<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<ThereminReport, Infallible> {
        let pitch = Reading::from(measure(&mut self.pitch, delay, self.echo_timeout_us));
        let volume = Reading::from(measure(&mut self.volume, delay, self.echo_timeout_us));

        let actuation = plan(pitch, volume);
        self.apply(&actuation);

        Ok(ThereminReport { pitch, volume, actuation })
    }

    fn shutdown(&mut self) {
        self.tone.set_envelope(0.0);
        self.leds.write(0x0000);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
