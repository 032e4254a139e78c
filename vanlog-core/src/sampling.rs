//! Sampling data model - samples, running sums, records
//!
//! One collection interval turns N instantaneous [`Sample`]s into a single
//! [`Record`] via an [`Accumulator`] of running sums:
//!
//! ```text
//! Sample x N -> Accumulator -> Means -> Record -> one tab-separated line
//! ```
//!
//! ## NaN Contamination
//!
//! Invalid sensor readings arrive as NaN and are summed as-is: one bad
//! sample makes the whole interval's mean NaN, and the record is written
//! anyway. Deliberately preserved - the record format has no "sample count"
//! column, so skipping bad samples would silently change what a mean *is*
//! from row to row. A NaN row is at least an honest gap.

use core::fmt;
use core::fmt::Write;

use crate::time::DateTime;

/// First line of a fresh data file: column labels for the record fields.
pub const FILE_HEADER: &str = "t\tH[%]\tT[C]\tT_RTC[C]";

/// Capacity of a formatted record line.
///
/// Worst case: 19 bytes of timestamp, 3 tabs, and three `f32`s which
/// `Display` can stretch to ~48 bytes each for subnormals. 192 covers it.
pub const RECORD_CAPACITY: usize = 192;

/// One formatted record line.
pub type RecordLine = heapless::String<RECORD_CAPACITY>;

/// Instantaneous reading triple, consumed immediately into the accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Relative humidity in percent, NaN if the read failed.
    pub humidity: f32,
    /// Sensor temperature in degrees Celsius, NaN if the read failed.
    pub temperature: f32,
    /// Clock-chip temperature in degrees Celsius.
    pub rtc_temperature: f32,
}

/// Running sums for one collection interval.
///
/// Divides by the *target* count, not the added count: the caller is
/// expected to add exactly `target` samples before asking for the mean, and
/// a fresh accumulator is built for every interval (no carryover).
#[derive(Debug, Clone)]
pub struct Accumulator {
    humidity: f32,
    temperature: f32,
    rtc_temperature: f32,
    target: u32,
    added: u32,
}

impl Accumulator {
    /// Zeroed sums aiming for `target` samples.
    pub fn new(target: u32) -> Self {
        Self {
            humidity: 0.0,
            temperature: 0.0,
            rtc_temperature: 0.0,
            target,
            added: 0,
        }
    }

    /// Fold one sample into the sums. No filtering: NaN goes in like any
    /// other value.
    pub fn add(&mut self, sample: Sample) {
        self.humidity += sample.humidity;
        self.temperature += sample.temperature;
        self.rtc_temperature += sample.rtc_temperature;
        self.added += 1;
    }

    /// Samples added so far.
    pub fn added(&self) -> u32 {
        self.added
    }

    /// True once the target count has been reached.
    pub fn is_full(&self) -> bool {
        self.added >= self.target
    }

    /// Arithmetic means, dividing each sum by the target count.
    pub fn mean(&self) -> Means {
        let n = self.target as f32;
        Means {
            humidity: self.humidity / n,
            temperature: self.temperature / n,
            rtc_temperature: self.rtc_temperature / n,
        }
    }
}

/// Per-interval arithmetic means.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Means {
    /// Mean relative humidity in percent.
    pub humidity: f32,
    /// Mean sensor temperature in degrees Celsius.
    pub temperature: f32,
    /// Mean clock-chip temperature in degrees Celsius.
    pub rtc_temperature: f32,
}

/// One output record: written once, never mutated, never retained.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// Wall-clock time at the end of the interval.
    pub timestamp: DateTime,
    /// Mean relative humidity in percent.
    pub humidity: f32,
    /// Mean sensor temperature in degrees Celsius.
    pub temperature: f32,
    /// Clock-chip temperature in degrees Celsius. Note: a fresh reading
    /// taken at format time, not the interval mean - a long-standing quirk
    /// of the file format, kept for continuity with existing data.
    pub rtc_temperature: f32,
}

impl fmt::Display for Record {
    /// Tab-separated fields with default float formatting, matching
    /// [`FILE_HEADER`] column for column.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.timestamp, self.humidity, self.temperature, self.rtc_temperature
        )
    }
}

impl Record {
    /// Render into a stack-allocated line buffer.
    pub fn to_line(&self) -> RecordLine {
        let mut line = RecordLine::new();
        // RECORD_CAPACITY covers the worst-case rendering, see above.
        write!(&mut line, "{}", self).ok();
        line
    }
}
