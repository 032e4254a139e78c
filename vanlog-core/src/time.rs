//! Calendar time and delay abstractions
//!
//! Provides the wall-clock [`DateTime`] carried on every record, the
//! compile-time [`BUILD_TIME`] constant used for one-shot RTC calibration,
//! and the [`Delay`] trait that paces the sampling loop:
//! - `SleepDelay` blocks the thread (when `std` is available)
//! - `CountingDelay` records requested delays for deterministic tests

use core::fmt;

/// Broken-down wall-clock time as reported by the RTC.
///
/// Field order matters: the derived `Ord` compares year first, then month,
/// and so on down to seconds, which is exactly chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateTime {
    /// Full year, e.g. 2026.
    pub year: u16,
    /// Month of year, 1-12.
    pub month: u8,
    /// Day of month, 1-31.
    pub day: u8,
    /// Hour, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-59.
    pub second: u8,
}

impl fmt::Display for DateTime {
    /// Renders `D/M/YYYY h:m:s` with no zero padding (`1/2/2026 3:4:5`),
    /// the timestamp format the data file has always used.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} {}:{}:{}",
            self.day, self.month, self.year, self.hour, self.minute, self.second
        )
    }
}

include!(concat!(env!("OUT_DIR"), "/build_time.rs"));

/// Blocking delay provider used to pace the sampling loop.
///
/// On hardware this is a busy-wait or timer peripheral; on a host it is
/// `thread::sleep`. The acquisition loop owns one and calls it between
/// samples, which ties interval duration to `N x sample_delay_ms`.
pub trait Delay {
    /// Block the caller for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Delay backed by `std::thread::sleep`.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepDelay;

#[cfg(feature = "std")]
impl Delay for SleepDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(ms as u64));
    }
}

/// Delay double for tests: returns immediately, records what was asked.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingDelay {
    calls: u32,
    total_ms: u64,
}

impl CountingDelay {
    /// Create a fresh counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `delay_ms` invocations so far.
    pub fn calls(&self) -> u32 {
        self.calls
    }

    /// Sum of all requested delays in milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }
}

impl Delay for CountingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.total_ms += ms as u64;
    }
}
