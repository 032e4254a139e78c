//! Core acquisition engine for vanlog
//!
//! Periodically samples a humidity/temperature sensor and a battery-backed
//! RTC, averages the readings over a fixed collection interval, and appends
//! one timestamped, tab-separated record per interval to a data file.
//!
//! Key constraints:
//! - Single-threaded, blocking acquisition - no scheduler, no tasks
//! - No heap allocation in the record path (heapless line buffers)
//! - Hardware behind traits so the engine runs on bare metal and in tests
//!
//! ```no_run
//! use vanlog_core::{AcquisitionLoop, LoggerConfig};
//! use vanlog_core::clock::SystemRtc;
//! use vanlog_core::sensor::ScriptedSensor;
//! use vanlog_core::storage::FsVolume;
//! use vanlog_core::time::SleepDelay;
//!
//! let sensor = ScriptedSensor::new(&[55.0], &[21.5]);
//! let mut logger = AcquisitionLoop::new(
//!     LoggerConfig::default(),
//!     sensor,
//!     SystemRtc::default(),
//!     FsVolume::new("data"),
//!     SleepDelay,
//! );
//!
//! // Runs forever; the only way out is a fatal clock failure.
//! if let Err(e) = logger.run() {
//!     eprintln!("{e}");
//!     std::process::exit(1);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod acquisition;
pub mod clock;
pub mod config;
pub mod errors;
pub mod sampling;
pub mod sensor;
pub mod storage;
pub mod time;

// Public API
pub use acquisition::AcquisitionLoop;
pub use clock::{ClockSource, Rtc};
pub use config::LoggerConfig;
pub use errors::{ClockError, StorageError};
pub use sampling::{Accumulator, Means, Record, Sample, FILE_HEADER};
pub use sensor::EnvironmentSensor;
pub use storage::{StorageManager, Volume};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
