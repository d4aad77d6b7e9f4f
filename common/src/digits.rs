//! Fixed two-decimal digit splitting.
//!
//! A magnitude is scaled by 100, rounded half-up and broken into four digits
//! by repeated `% 10` / `/ 10`, least significant first. The display shows
//! `tens ones . tenths hundredths`.

use micromath::F32;

/// Number of digits produced (tens, ones, tenths, hundredths).
pub const DIGIT_COUNT: usize = 4;

/// Four decimal digits, most significant first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digits([u8; DIGIT_COUNT]);

impl Digits {
    /// Split `|value|` into tens, ones, tenths and hundredths.
    ///
    /// The sign is dropped. Only the lowest four digits of the scaled value
    /// are kept, so 123.45 splits as 23.45. NaN splits as 00.00.
    pub fn from_magnitude(value: f32) -> Self {
        let magnitude = if value < 0.0 { -value } else { value };
        // `as` saturates: NaN -> 0, inf -> u32::MAX
        let scaled = F32(magnitude * 100.0 + 0.5).floor().0 as u32;

        let mut digits = [0u8; DIGIT_COUNT];
        let mut rest = scaled;
        for digit in digits.iter_mut().rev() {
            *digit = (rest % 10) as u8;
            rest /= 10;
        }
        Self(digits)
    }

    #[inline]
    pub const fn tens(&self) -> u8 { self.0[0] }

    #[inline]
    pub const fn ones(&self) -> u8 { self.0[1] }

    #[inline]
    pub const fn tenths(&self) -> u8 { self.0[2] }

    #[inline]
    pub const fn hundredths(&self) -> u8 { self.0[3] }

    /// Digits in display order: tens, ones, tenths, hundredths.
    #[inline]
    pub const fn as_array(&self) -> [u8; DIGIT_COUNT] { self.0 }
}

// =============================================================================
// Unit Tests
// =============================================================================
