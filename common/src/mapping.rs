//! Clamped linear maps from a sensor range onto an output range.
//!
//! The input is always pulled into `[min, max]` before interpolating, so a
//! reading outside the range lands on the nearest end of the output range.
//! Nothing is ever extrapolated.
//!
//! Both constructors are `const fn` and reject ranges that would make the
//! interpolation meaningless (zero-width input, inverted output).

use core::fmt;

/// Invalid mapping configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `min >= max`: the input span is zero (or negative).
    EmptyInputRange,
    /// `low > high` (or a NaN bound) on the output side.
    InvertedOutputRange,
}

impl fmt::Display for ConfigError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::EmptyInputRange => f.write_str("input range is empty"),
            Self::InvertedOutputRange => f.write_str("output range is inverted"),
        }
    }
}

/// Direction of a map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slope {
    /// `min` maps to `low`, `max` maps to `high`.
    Rising,
    /// `min` maps to `high`, `max` maps to `low`.
    Falling,
}

/// Non-empty input interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputRange {
    min: u32,
    max: u32,
}

impl InputRange {
    pub const fn new(
        min: u32,
        max: u32,
    ) -> Result<Self, ConfigError> {
        if min >= max {
            return Err(ConfigError::EmptyInputRange);
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub const fn min(&self) -> u32 { self.min }

    #[inline]
    pub const fn max(&self) -> u32 { self.max }

    /// Width of the interval, never zero.
    #[inline]
    pub const fn span(&self) -> u32 { self.max - self.min }

    /// Pull `value` to the nearest bound if it lies outside the interval.
    #[inline]
    pub const fn clamp(
        &self,
        value: u32,
    ) -> u32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Distance of the clamped value from `min`, in `0..=span`.
    #[inline]
    pub const fn offset(
        &self,
        value: u32,
    ) -> u32 {
        self.clamp(value) - self.min
    }
}

/// Integer map, e.g. distance (mm) to carrier frequency (Hz).
///
/// Uses truncating integer division with a 64-bit intermediate, so
/// `offset * (high - low)` cannot overflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinearMap {
    input: InputRange,
    low: u32,
    high: u32,
    slope: Slope,
}

impl LinearMap {
    pub const fn new(
        in_min: u32,
        in_max: u32,
        low: u32,
        high: u32,
        slope: Slope,
    ) -> Result<Self, ConfigError> {
        let input = match InputRange::new(in_min, in_max) {
            Ok(input) => input,
            Err(e) => return Err(e),
        };
        if low > high {
            return Err(ConfigError::InvertedOutputRange);
        }
        Ok(Self {
            input,
            low,
            high,
            slope,
        })
    }

    #[inline]
    pub const fn input(&self) -> InputRange { self.input }

    pub const fn map(
        &self,
        value: u32,
    ) -> u32 {
        let offset = self.input.offset(value) as u64;
        let out_range = (self.high - self.low) as u64;
        let delta = (offset * out_range / self.input.span() as u64) as u32;
        match self.slope {
            Slope::Rising => self.low + delta,
            Slope::Falling => self.high - delta,
        }
    }
}

/// Floating-point map, e.g. distance (mm) to a 0.0..=1.0 envelope.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EnvelopeMap {
    input: InputRange,
    low: f32,
    high: f32,
    slope: Slope,
}

impl EnvelopeMap {
    pub const fn new(
        in_min: u32,
        in_max: u32,
        low: f32,
        high: f32,
        slope: Slope,
    ) -> Result<Self, ConfigError> {
        let input = match InputRange::new(in_min, in_max) {
            Ok(input) => input,
            Err(e) => return Err(e),
        };
        // Also rejects NaN bounds
        if !(low <= high) {
            return Err(ConfigError::InvertedOutputRange);
        }
        Ok(Self {
            input,
            low,
            high,
            slope,
        })
    }

    #[inline]
    pub const fn input(&self) -> InputRange { self.input }

    pub fn map(
        &self,
        value: u32,
    ) -> f32 {
        let fraction = self.input.offset(value) as f32 / self.input.span() as f32;
        let out_range = self.high - self.low;
        match self.slope {
            Slope::Rising => self.low + fraction * out_range,
            Slope::Falling => self.high - fraction * out_range,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
