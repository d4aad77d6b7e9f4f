//! Simulated peripherals with generated sensor data.
//!
//! Each sensor advances its own phase every time it is read, so the values
//! sweep smoothly regardless of how fast the simulation runs.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation, SevenBitAddress};
use sensor_demos_common::adt7420::{ID_REG, TEMP_MSB_REG};
use sensor_demos_common::config::{ADT7420_ADDRESS, ADT7420_DEVICE_ID};
use sensor_demos_common::segments::{BLANK, GLYPH_MINUS, POSITIONS, hex_pattern};
use sensor_demos_common::ultrasonic::NO_ECHO;
use sensor_demos_common::{DisplayFrame, DistanceSensor, LedBank, SevenSegment, ToneGenerator};

/// Sine sweep between `min` and `max`.
pub fn fake_signal(
    t: f32,
    min: f32,
    max: f32,
    freq: f32,
) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}

/// Register word the ADT7420 would hold for `celsius` (13-bit mode).
pub fn encode_temperature(celsius: f32) -> u16 {
    let counts = (celsius * 16.0).round() as i16;
    (counts << 3) as u16
}

// =============================================================================
// ADT7420
// =============================================================================

/// ADT7420 answering on the I2C bus with a slowly drifting temperature.
pub struct SimAdt7420 {
    t: f32,
    min_c: f32,
    max_c: f32,
    /// Every n-th transaction is NACKed (0 = never).
    nack_every: u32,
    transactions: u32,
}

impl SimAdt7420 {
    pub fn new(
        min_c: f32,
        max_c: f32,
    ) -> Self {
        Self {
            t: 0.0,
            min_c,
            max_c,
            nack_every: 0,
            transactions: 0,
        }
    }

    pub fn with_nack_every(
        mut self,
        n: u32,
    ) -> Self {
        self.nack_every = n;
        self
    }

    fn next_temperature(&mut self) -> f32 {
        let celsius = fake_signal(self.t, self.min_c, self.max_c, 0.4);
        self.t += 1.0;
        celsius
    }
}

impl ErrorType for SimAdt7420 {
    type Error = ErrorKind;
}

impl I2c for SimAdt7420 {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), ErrorKind> {
        if address != ADT7420_ADDRESS {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        self.transactions += 1;
        if self.nack_every != 0 && self.transactions % self.nack_every == 0 {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        let mut register = TEMP_MSB_REG;
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    if let Some(&reg) = bytes.first() {
                        register = reg;
                    }
                },
                Operation::Read(buffer) => {
                    let word = match register {
                        TEMP_MSB_REG => encode_temperature(self.next_temperature()),
                        ID_REG => u16::from(ADT7420_DEVICE_ID) << 8,
                        _ => 0,
                    };
                    let bytes = word.to_be_bytes();
                    for (byte, value) in buffer.iter_mut().zip(bytes.iter().chain(std::iter::repeat(&0))) {
                        *byte = *value;
                    }
                },
            }
        }
        Ok(())
    }
}

// =============================================================================
// Seven-Segment Display
// =============================================================================

#[derive(Debug)]
pub struct SimDisplay {
    patterns: [u8; POSITIONS],
    dp_mask: u8,
}

impl SimDisplay {
    pub fn new() -> Self {
        Self {
            patterns: [BLANK; POSITIONS],
            dp_mask: 0,
        }
    }

    pub fn to_ascii(&self) -> String { patterns_to_ascii(&self.patterns, self.dp_mask) }
}

impl SevenSegment for SimDisplay {
    fn write_pattern(
        &mut self,
        pattern: u8,
        position: usize,
    ) {
        if let Some(slot) = self.patterns.get_mut(position) {
            *slot = pattern | 0x80;
        }
    }

    fn set_decimal_points(
        &mut self,
        mask: u8,
    ) {
        self.dp_mask = mask;
    }
}

fn glyph(pattern: u8) -> char {
    let pattern = pattern | 0x80;
    match pattern {
        BLANK => ' ',
        GLYPH_MINUS => '-',
        _ => (0u8..16)
            .find(|&digit| hex_pattern(digit) == pattern)
            .and_then(|digit| char::from_digit(u32::from(digit), 16))
            .map_or('?', |c| c.to_ascii_uppercase()),
    }
}

/// Display contents left to right, with `.` after digits whose DP is lit.
pub fn patterns_to_ascii(
    patterns: &[u8; POSITIONS],
    dp_mask: u8,
) -> String {
    let mut text = String::with_capacity(POSITIONS * 2);
    for position in (0..POSITIONS).rev() {
        text.push(glyph(patterns[position]));
        if dp_mask & (1 << position) != 0 {
            text.push('.');
        }
    }
    text
}

pub fn frame_to_ascii(frame: &DisplayFrame) -> String { patterns_to_ascii(frame.patterns(), frame.dp_mask()) }

// =============================================================================
// Ultrasonic Sensor
// =============================================================================

/// Hand moving back and forth in front of a sensor.
pub struct SimSensor {
    t: f32,
    freq: f32,
    /// Every n-th measurement gets no echo (0 = never).
    no_echo_every: u32,
    measurements: u32,
    busy_polls: u32,
    distance: u32,
}

impl SimSensor {
    pub fn new(freq: f32) -> Self {
        Self {
            t: 0.0,
            freq,
            no_echo_every: 0,
            measurements: 0,
            busy_polls: 0,
            distance: NO_ECHO,
        }
    }

    pub fn with_no_echo_every(
        mut self,
        n: u32,
    ) -> Self {
        self.no_echo_every = n;
        self
    }
}

impl DistanceSensor for SimSensor {
    fn trigger(&mut self) {
        self.measurements += 1;
        self.busy_polls = 3;
        self.distance = if self.no_echo_every != 0 && self.measurements % self.no_echo_every == 0 {
            NO_ECHO
        } else {
            fake_signal(self.t, 20.0, 260.0, self.freq) as u32
        };
        self.t += 1.0;
    }

    fn is_busy(&mut self) -> bool {
        if self.busy_polls == 0 {
            return false;
        }
        self.busy_polls -= 1;
        true
    }

    fn read_distance(&mut self) -> u32 { self.distance }
}

// =============================================================================
// Tone Generator and LEDs
// =============================================================================

#[derive(Debug, Default)]
pub struct SimTone {
    pub frequency: Option<u32>,
    pub envelope: f32,
}

impl ToneGenerator for SimTone {
    fn set_carrier_freq(
        &mut self,
        hz: u32,
    ) {
        self.frequency = Some(hz);
    }

    fn set_envelope(
        &mut self,
        envelope: f32,
    ) {
        self.envelope = envelope;
    }
}

#[derive(Debug, Default)]
pub struct SimLeds {
    pub bits: u16,
}

impl LedBank for SimLeds {
    fn write(
        &mut self,
        bits: u16,
    ) {
        self.bits = bits;
    }
}

/// `[volume bar|pitch bar]`, LED 15 leftmost.
pub fn leds_to_ascii(bits: u16) -> String {
    let mut text = String::from("[");
    for led in (0..16).rev() {
        text.push(if bits & (1 << led) != 0 { '#' } else { '.' });
        if led == 8 {
            text.push('|');
        }
    }
    text.push(']');
    text
}

// =============================================================================
// Unit Tests
// =============================================================================
