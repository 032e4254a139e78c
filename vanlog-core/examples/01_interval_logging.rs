//! Interval Logging Example
//!
//! Runs the full acquisition loop on the host with a scripted sensor, the
//! system clock, and a real data directory. Every five seconds one averaged
//! record is appended to `data/newvandata.txt` and mirrored to stdout.
//!
//! ## What You'll Learn
//!
//! - Assembling the loop from its four hardware seams
//! - How the sampling phase paces the interval (N samples x fixed delay)
//! - The append-only file format (header + tab-separated records)
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_interval_logging
//! ```

use vanlog_core::{
    acquisition::AcquisitionLoop,
    clock::SystemRtc,
    config::LoggerConfig,
    sensor::ScriptedSensor,
    storage::FsVolume,
    time::SleepDelay,
};

/// Minimal logger that mirrors the engine's console output to stdout.
struct StdoutLogger;

impl log::Log for StdoutLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        println!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StdoutLogger = StdoutLogger;

fn main() {
    log::set_logger(&LOGGER).expect("logger already set");
    log::set_max_level(log::LevelFilter::Debug);

    println!("vanlog Interval Logging Example");
    println!("===============================\n");

    // A synthetic afternoon in the van: humidity drifting down, cabin
    // warming up. One NaN entry simulates a failed sensor transaction so
    // you can watch an interval get poisoned.
    let humidity = [62.0, 61.5, 61.0, 60.5, 60.0, f32::NAN, 59.5, 59.0];
    let temperature = [21.0, 21.2, 21.4, 21.6, 21.8, 22.0, 22.2, 22.4];
    let sensor = ScriptedSensor::new(&humidity, &temperature);

    // Five-second intervals instead of the deployed 900 s, so the demo
    // produces a record before you lose interest.
    let config = LoggerConfig {
        interval_secs: 5.0,
        ..LoggerConfig::default()
    };

    println!(
        "Writing one record every {} s to data/{}\n",
        config.interval_secs, config.filename
    );

    let mut logger = AcquisitionLoop::new(
        config,
        sensor,
        SystemRtc::default(),
        FsVolume::new("data"),
        SleepDelay,
    );

    // `run` only returns on the fatal clock failure; map it to a clean
    // nonzero exit instead of an abort.
    if let Err(e) = logger.run() {
        eprintln!("fatal: {e}");
        std::process::exit(1);
    }
}
