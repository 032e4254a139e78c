//! Acquisition Loop - the top of the system
//!
//! Orchestrates one cycle per interval through the fixed phase sequence:
//!
//! ```text
//! STARTUP (once) -> SAMPLING -> AGGREGATING -> PERSISTING -> SAMPLING -> ...
//! ```
//!
//! All hardware is owned by the loop as explicit resources behind traits -
//! sensor, RTC, storage volume, delay - so the same engine runs against real
//! drivers on a board and against doubles in tests.
//!
//! ## Failure Semantics
//!
//! Only `STARTUP` can fail, and only on the clock. After that the loop never
//! retries and never re-queues: a NaN sample is averaged in, a dropped write
//! stays dropped, and every phase advances regardless of per-step success.
//! There are no timeouts either - an unresponsive device stalls the single
//! execution context, which is the documented trade of this design.

use core::convert::Infallible;

use log::info;

use crate::clock::{ClockSource, Rtc};
use crate::config::LoggerConfig;
use crate::errors::ClockError;
use crate::sampling::{Accumulator, Record, Sample, FILE_HEADER};
use crate::sensor::EnvironmentSensor;
use crate::storage::{StorageManager, Volume};
use crate::time::Delay;

/// The acquisition state machine, generic over its four hardware seams.
pub struct AcquisitionLoop<S, R, V, D>
where
    S: EnvironmentSensor,
    R: Rtc,
    V: Volume,
    D: Delay,
{
    config: LoggerConfig,
    sensor: S,
    clock: ClockSource<R>,
    storage: StorageManager<V>,
    delay: D,
}

impl<S, R, V, D> AcquisitionLoop<S, R, V, D>
where
    S: EnvironmentSensor,
    R: Rtc,
    V: Volume,
    D: Delay,
{
    /// Assemble the loop from its owned resources. No hardware access until
    /// [`start`](Self::start).
    pub fn new(config: LoggerConfig, sensor: S, rtc: R, volume: V, delay: D) -> Self {
        Self {
            sensor,
            clock: ClockSource::new(rtc),
            storage: StorageManager::new(volume, config.filename),
            delay,
            config,
        }
    }

    /// The `STARTUP` phase, run once.
    ///
    /// Storage bring-up is degraded-continue; the clock is the fatal path
    /// and `?`s out before any sample is taken. After a settle delay the
    /// data file gets its header if it is empty.
    pub fn start(&mut self) -> Result<(), ClockError> {
        self.storage.init();
        self.clock.init()?;
        self.sensor.begin();
        self.delay.delay_ms(self.config.settle_delay_ms);
        self.storage.ensure_header(FILE_HEADER);
        Ok(())
    }

    /// One full interval: sample N times, aggregate, persist, return the
    /// record that was written.
    pub fn run_interval(&mut self) -> Record {
        // SAMPLING: exactly N unit-delay steps; wall-clock interval length
        // is N x sample_delay by construction, not timer-driven.
        let n = self.config.samples_per_interval();
        let mut acc = Accumulator::new(n);
        for _ in 0..n {
            acc.add(Sample {
                humidity: self.sensor.read_humidity(),
                temperature: self.sensor.read_temperature(),
                rtc_temperature: self.clock.temperature(),
            });
            self.delay.delay_ms(self.config.sample_delay_ms);
        }

        // AGGREGATING: means by /N. The record's RTC column takes a fresh
        // reading instead of the mean the accumulator just computed - the
        // file format has always worked that way, so it stays.
        let means = acc.mean();
        let record = Record {
            timestamp: self.clock.now(),
            humidity: means.humidity,
            temperature: means.temperature,
            rtc_temperature: self.clock.temperature(),
        };

        // PERSISTING: one append, mirrored to the console. No retry.
        let line = record.to_line();
        self.storage.append_line(&line);
        info!("{}", line);

        record
    }

    /// Run forever: `start`, then one record per interval until the process
    /// dies. The only `Err` is the fatal clock failure during startup.
    pub fn run(&mut self) -> Result<Infallible, ClockError> {
        self.start()?;
        loop {
            self.run_interval();
        }
    }

    /// Storage manager, exposed so callers and tests can inspect state
    /// (degraded flag, written bytes via the volume).
    pub fn storage(&self) -> &StorageManager<V> {
        &self.storage
    }

    /// The delay provider, exposed for tests that count sleeps.
    pub fn delay(&self) -> &D {
        &self.delay
    }
}
