//! Compiled-in logger configuration
//!
//! The deployed logger has no runtime configuration: every knob is a
//! constant chosen once for the installation. They are gathered into
//! [`LoggerConfig`] so tests and demos can shrink the interval without
//! touching the defaults the hardware runs with.

/// Name of the data file on the storage volume.
pub const DATA_FILENAME: &str = "newvandata.txt";

/// Delay between individual sensor samples (ms).
///
/// One sample per second. DHT22 datasheets ask for >=2 s between reads;
/// polling at 1 Hz returns the previous conversion on every other read,
/// which is acceptable for 15-minute averages.
pub const SAMPLE_DELAY_MS: u32 = 1000;

/// Collection interval over which samples are averaged (s).
///
/// Also fixes the per-interval sample count: the loop takes
/// `floor(INTERVAL_SECS)` samples spaced `SAMPLE_DELAY_MS` apart, so the
/// sampling phase lasts approximately one interval by construction. The
/// interval drifts by however long the reads themselves take; at 900 s per
/// record that error is noise.
pub const INTERVAL_SECS: f32 = 900.0;

/// Settle delay between hardware bring-up and the first file access (ms).
///
/// Gives the sensor and card time to stabilize after power-on.
pub const SETTLE_DELAY_MS: u32 = 1000;

/// Acquisition parameters, defaulting to the deployed constants.
#[derive(Debug, Clone, Copy)]
pub struct LoggerConfig {
    /// Data file name on the volume.
    pub filename: &'static str,
    /// Delay between samples in milliseconds.
    pub sample_delay_ms: u32,
    /// Averaging interval in seconds.
    pub interval_secs: f32,
    /// Post-startup settle delay in milliseconds.
    pub settle_delay_ms: u32,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            filename: DATA_FILENAME,
            sample_delay_ms: SAMPLE_DELAY_MS,
            interval_secs: INTERVAL_SECS,
            settle_delay_ms: SETTLE_DELAY_MS,
        }
    }
}

impl LoggerConfig {
    /// Samples per interval: `floor(interval_secs)`, the divisor N used for
    /// the means.
    pub fn samples_per_interval(&self) -> u32 {
        self.interval_secs as u32
    }
}
