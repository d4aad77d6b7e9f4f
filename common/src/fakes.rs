//! In-memory peripherals for unit tests.

use embedded_hal::delay::DelayNs;

use crate::periph::{DistanceSensor, LedBank, SevenSegment, ToneGenerator};
use crate::segments::{BLANK, POSITIONS};

/// Seven-segment display that keeps what was last written to each position.
#[derive(Debug)]
pub struct FakeDisplay {
    pub patterns: [u8; POSITIONS],
    pub dp_mask: u8,
    pub pattern_writes: usize,
}

impl FakeDisplay {
    pub fn new() -> Self {
        Self {
            patterns: [BLANK; POSITIONS],
            dp_mask: 0,
            pattern_writes: 0,
        }
    }
}

impl SevenSegment for FakeDisplay {
    fn write_pattern(
        &mut self,
        pattern: u8,
        position: usize,
    ) {
        self.patterns[position] = pattern;
        self.pattern_writes += 1;
    }

    fn set_decimal_points(
        &mut self,
        mask: u8,
    ) {
        self.dp_mask = mask;
    }
}

/// Distance sensor with a fixed result and a scripted busy period.
#[derive(Debug)]
pub struct FakeSensor {
    pub distance_raw: u32,
    /// Busy polls left before the measurement completes; `None` never completes.
    busy_polls: Option<u32>,
    busy_per_trigger: Option<u32>,
    pub triggers: u32,
    pub distance_reads: u32,
}

impl FakeSensor {
    pub fn new(distance_raw: u32) -> Self {
        Self {
            distance_raw,
            busy_polls: Some(0),
            busy_per_trigger: Some(0),
            triggers: 0,
            distance_reads: 0,
        }
    }

    /// Report busy for `polls` polls after each trigger.
    pub fn busy_for(
        mut self,
        polls: u32,
    ) -> Self {
        self.busy_per_trigger = Some(polls);
        self
    }

    pub fn busy_forever(mut self) -> Self {
        self.busy_per_trigger = None;
        self
    }
}

impl DistanceSensor for FakeSensor {
    fn trigger(&mut self) {
        self.triggers += 1;
        self.busy_polls = self.busy_per_trigger;
    }

    fn is_busy(&mut self) -> bool {
        match self.busy_polls.as_mut() {
            None => true,
            Some(0) => false,
            Some(left) => {
                *left -= 1;
                true
            },
        }
    }

    fn read_distance(&mut self) -> u32 {
        self.distance_reads += 1;
        self.distance_raw
    }
}

/// Tone generator that remembers the last values written.
#[derive(Debug, Default)]
pub struct FakeTone {
    pub frequency: Option<u32>,
    pub envelope: Option<f32>,
    pub frequency_writes: u32,
    pub envelope_writes: u32,
}

impl ToneGenerator for FakeTone {
    fn set_carrier_freq(
        &mut self,
        hz: u32,
    ) {
        self.frequency = Some(hz);
        self.frequency_writes += 1;
    }

    fn set_envelope(
        &mut self,
        envelope: f32,
    ) {
        self.envelope = Some(envelope);
        self.envelope_writes += 1;
    }
}

/// LED bank that records every write.
#[derive(Debug, Default)]
pub struct FakeLeds {
    pub bits: u16,
    pub history: Vec<u16>,
}

impl LedBank for FakeLeds {
    fn write(
        &mut self,
        bits: u16,
    ) {
        self.bits = bits;
        self.history.push(bits);
    }
}

/// Delay that only adds up how long it was asked to wait.
#[derive(Debug, Default)]
pub struct CountingDelay {
    pub total_ns: u64,
    pub calls: u32,
}

impl CountingDelay {
    pub fn new() -> Self { Self::default() }

    pub fn total_ms(&self) -> u64 { self.total_ns / 1_000_000 }
}

impl DelayNs for CountingDelay {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }
}
