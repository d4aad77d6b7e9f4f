//! Seven-segment patterns and the thermometer display frame.
//!
//! Patterns are active-low in `DP G F E D C B A` bit order, as the
//! seven-segment core expects: `0xFF` is all segments off. Position 0 is the
//! rightmost digit, position 7 the leftmost.
//!
//! # Frame Layout
//!
//! ```text
//! position:  7    6    5    4    3    2    1    0
//!           tens ones tnth hndr  C   ' '  ' '  ' '
//!                    ^ decimal point
//! ```

use crate::digits::Digits;
use crate::periph::SevenSegment;

/// Number of digit positions on the display.
pub const POSITIONS: usize = 8;

/// All segments off.
pub const BLANK: u8 = 0xFF;

/// Segments A, D, E, F: the `C` unit glyph.
pub const GLYPH_C: u8 = 0xC6;

/// Segment G only.
pub const GLYPH_MINUS: u8 = 0xBF;

/// Hex digit patterns 0-F.
const HEX_PATTERNS: [u8; 16] = [
    0xC0, 0xF9, 0xA4, 0xB0, 0x99, 0x92, 0x82, 0xF8, 0x80, 0x90, 0x88, 0x83, 0xC6, 0xA1, 0x86, 0x8E,
];

pub const TENS_POS: usize = 7;
pub const ONES_POS: usize = 6;
pub const TENTHS_POS: usize = 5;
pub const HUNDREDTHS_POS: usize = 4;
pub const UNIT_POS: usize = 3;

/// Pattern for the low nibble of `value`.
#[inline]
pub const fn hex_pattern(value: u8) -> u8 { HEX_PATTERNS[(value & 0x0F) as usize] }

/// One complete display state: eight patterns plus the decimal-point mask.
///
/// Rendering always writes every position, since the core holds whatever
/// was last written to a position indefinitely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayFrame {
    patterns: [u8; POSITIONS],
    dp_mask: u8,
}

impl DisplayFrame {
    /// Everything off, no decimal points.
    pub const fn blank() -> Self {
        Self {
            patterns: [BLANK; POSITIONS],
            dp_mask: 0,
        }
    }

    /// `XX.XXC` with a blanked leading zero in the tens position.
    pub const fn temperature(digits: &Digits) -> Self {
        let mut frame = Self::blank();
        if digits.tens() != 0 {
            frame.patterns[TENS_POS] = hex_pattern(digits.tens());
        }
        frame.patterns[ONES_POS] = hex_pattern(digits.ones());
        frame.patterns[TENTHS_POS] = hex_pattern(digits.tenths());
        frame.patterns[HUNDREDTHS_POS] = hex_pattern(digits.hundredths());
        frame.patterns[UNIT_POS] = GLYPH_C;
        frame.dp_mask = 1 << ONES_POS;
        frame
    }

    /// Dashes in the four digit positions, used when no reading is available.
    pub const fn dashes() -> Self {
        let mut frame = Self::blank();
        frame.patterns[TENS_POS] = GLYPH_MINUS;
        frame.patterns[ONES_POS] = GLYPH_MINUS;
        frame.patterns[TENTHS_POS] = GLYPH_MINUS;
        frame.patterns[HUNDREDTHS_POS] = GLYPH_MINUS;
        frame.patterns[UNIT_POS] = GLYPH_C;
        frame
    }

    #[inline]
    pub const fn pattern(
        &self,
        position: usize,
    ) -> u8 {
        self.patterns[position]
    }

    #[inline]
    pub const fn patterns(&self) -> &[u8; POSITIONS] { &self.patterns }

    #[inline]
    pub const fn dp_mask(&self) -> u8 { self.dp_mask }

    /// Write all eight positions, then the decimal-point mask.
    pub fn render<S: SevenSegment + ?Sized>(
        &self,
        display: &mut S,
    ) {
        for (position, &pattern) in self.patterns.iter().enumerate() {
            display.write_pattern(pattern, position);
        }
        display.set_decimal_points(self.dp_mask);
    }
}

impl Default for DisplayFrame {
    fn default() -> Self { Self::blank() }
}

// =============================================================================
// Unit Tests
// =============================================================================
