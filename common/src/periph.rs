//! Capability traits for the fixed-function peripheral cores.
//!
//! Each trait is the narrow set of operations the applications need from one
//! core, independent of where that core is mapped. The register-level
//! drivers live in the firmware crate; the simulator and the unit tests
//! provide their own implementations.
//!
//! The I2C bus and the delay source use the `embedded-hal` traits
//! ([`embedded_hal::i2c::I2c`], [`embedded_hal::delay::DelayNs`]) directly.

/// Eight-digit multiplexed seven-segment display.
pub trait SevenSegment {
    /// Write one raw active-low pattern to `position` (0 = rightmost).
    ///
    /// Bit 7 (decimal point) of `pattern` is ignored; decimal points are
    /// controlled by [`set_decimal_points`](Self::set_decimal_points).
    fn write_pattern(
        &mut self,
        pattern: u8,
        position: usize,
    );

    /// Bit `i` of `mask` lights the decimal point at position `i`.
    fn set_decimal_points(
        &mut self,
        mask: u8,
    );
}

/// Ultrasonic distance core that runs its own trigger/echo state machine.
pub trait DistanceSensor {
    /// Start a measurement. Returns immediately.
    fn trigger(&mut self);

    /// `true` while a measurement is in progress.
    fn is_busy(&mut self) -> bool;

    /// Last distance in millimeters, or [`NO_ECHO`](crate::ultrasonic::NO_ECHO).
    fn read_distance(&mut self) -> u32;
}

/// Direct digital synthesizer.
pub trait ToneGenerator {
    fn set_carrier_freq(
        &mut self,
        hz: u32,
    );

    /// Amplitude scaling, 0.0 (silent) to 1.0 (full scale).
    fn set_envelope(
        &mut self,
        envelope: f32,
    );
}

/// Bank of discrete LEDs, all bits written at once.
pub trait LedBank {
    fn write(
        &mut self,
        bits: u16,
    );
}

impl<T: SevenSegment + ?Sized> SevenSegment for &mut T {
    fn write_pattern(
        &mut self,
        pattern: u8,
        position: usize,
    ) {
        (**self).write_pattern(pattern, position);
    }

    fn set_decimal_points(
        &mut self,
        mask: u8,
    ) {
        (**self).set_decimal_points(mask);
    }
}

impl<T: DistanceSensor + ?Sized> DistanceSensor for &mut T {
    fn trigger(&mut self) { (**self).trigger(); }

    fn is_busy(&mut self) -> bool { (**self).is_busy() }

    fn read_distance(&mut self) -> u32 { (**self).read_distance() }
}

impl<T: ToneGenerator + ?Sized> ToneGenerator for &mut T {
    fn set_carrier_freq(
        &mut self,
        hz: u32,
    ) {
        (**self).set_carrier_freq(hz);
    }

    fn set_envelope(
        &mut self,
        envelope: f32,
    ) {
        (**self).set_envelope(envelope);
    }
}

impl<T: LedBank + ?Sized> LedBank for &mut T {
    fn write(
        &mut self,
        bits: u16,
    ) {
        (**self).write(bits);
    }
}
