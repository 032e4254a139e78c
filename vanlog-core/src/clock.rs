//! Clock Source - battery-backed wall-clock time and reference temperature
//!
//! Wraps an RTC driver (DS3231-class: battery-backed calendar time plus an
//! on-chip thermometer) behind the [`Rtc`] trait and adds the startup policy
//! the logger needs:
//!
//! - a clock that cannot be detected is **fatal** - every record depends on
//!   its timestamps, so there is nothing useful to do without it;
//! - a clock that lost backup power is set once to [`BUILD_TIME`], a
//!   best-effort calibration that is stale by the age of the firmware but
//!   beats logging from 1/1/2000.
//!
//! Once initialized, `now()` and `temperature()` are infallible: the
//! hardware either answers or the whole (timeout-free, single-threaded)
//! system stalls with it.

use log::{error, info};

use crate::errors::ClockError;
use crate::time::{DateTime, BUILD_TIME};

/// RTC driver capabilities the clock source relies on.
pub trait Rtc {
    /// Probe and start the device. Returns `false` if it is not present.
    fn begin(&mut self) -> bool;

    /// Whether the device's backup power failed since it was last set,
    /// meaning its time may be stale or invalid.
    fn lost_power(&self) -> bool;

    /// Set the device time.
    fn adjust(&mut self, to: DateTime);

    /// Current wall-clock time.
    fn now(&self) -> DateTime;

    /// On-chip temperature in degrees Celsius. Used as a reference reading
    /// independent of the environmental sensor.
    fn temperature(&self) -> f32;
}

/// Owns the RTC and applies the startup/calibration policy.
pub struct ClockSource<R: Rtc> {
    rtc: R,
}

impl<R: Rtc> ClockSource<R> {
    /// Wrap an RTC driver. No hardware access until [`init`](Self::init).
    pub fn new(rtc: R) -> Self {
        Self { rtc }
    }

    /// Start the RTC and calibrate it if its backup power was lost.
    ///
    /// This is the one fatal path in the system: callers are expected to
    /// terminate (cleanly, nonzero) on `Err` before any sample is taken.
    pub fn init(&mut self) -> Result<(), ClockError> {
        if !self.rtc.begin() {
            error!("couldn't find RTC");
            return Err(ClockError::NotDetected);
        }

        if self.rtc.lost_power() {
            info!("RTC lost power, setting clock to build time {}", BUILD_TIME);
            self.rtc.adjust(BUILD_TIME);
        }

        Ok(())
    }

    /// Current wall-clock time.
    pub fn now(&self) -> DateTime {
        self.rtc.now()
    }

    /// Clock-chip temperature in degrees Celsius.
    pub fn temperature(&self) -> f32 {
        self.rtc.temperature()
    }
}

/// Host-side RTC backed by the operating system clock.
///
/// Never reports a power loss and ignores `adjust` - the host clock is not
/// ours to set. The chip thermometer is faked with a fixed value so host
/// runs still produce finite reference readings.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct SystemRtc {
    temperature: f32,
}

#[cfg(feature = "std")]
impl SystemRtc {
    /// Host clock reporting the given fixed chip temperature.
    pub fn with_temperature(temperature: f32) -> Self {
        Self { temperature }
    }
}

#[cfg(feature = "std")]
impl Default for SystemRtc {
    fn default() -> Self {
        Self::with_temperature(25.0)
    }
}

#[cfg(feature = "std")]
impl Rtc for SystemRtc {
    fn begin(&mut self) -> bool {
        true
    }

    fn lost_power(&self) -> bool {
        false
    }

    fn adjust(&mut self, _to: DateTime) {}

    fn now(&self) -> DateTime {
        use chrono::{Datelike, Local, Timelike};

        let now = Local::now();
        DateTime {
            year: now.year() as u16,
            month: now.month() as u8,
            day: now.day() as u8,
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
        }
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }
}

/// Controllable RTC for deterministic tests.
///
/// Time is fixed at construction (and moved by `adjust`), the lost-power
/// flag is scripted, and every `adjust` call is recorded so tests can assert
/// the calibrate-once behavior.
#[derive(Debug, Clone)]
pub struct MockRtc {
    detected: bool,
    lost_power: bool,
    now: DateTime,
    temperature: f32,
    adjust_calls: u32,
}

impl MockRtc {
    /// A detected, powered RTC reading the given time.
    pub fn new(now: DateTime) -> Self {
        Self {
            detected: true,
            lost_power: false,
            now,
            temperature: 25.0,
            adjust_calls: 0,
        }
    }

    /// Simulate a device that is absent from the bus.
    pub fn undetected(mut self) -> Self {
        self.detected = false;
        self
    }

    /// Simulate a device whose backup battery failed.
    pub fn with_lost_power(mut self) -> Self {
        self.lost_power = true;
        self
    }

    /// Fix the chip thermometer reading.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// How many times `adjust` was called.
    pub fn adjust_calls(&self) -> u32 {
        self.adjust_calls
    }
}

impl Rtc for MockRtc {
    fn begin(&mut self) -> bool {
        self.detected
    }

    fn lost_power(&self) -> bool {
        self.lost_power
    }

    fn adjust(&mut self, to: DateTime) {
        self.adjust_calls += 1;
        self.lost_power = false;
        self.now = to;
    }

    fn now(&self) -> DateTime {
        self.now
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }
}
