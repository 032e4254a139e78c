//! End-to-end tests for the acquisition loop against test doubles and a
//! real filesystem volume.

use vanlog_core::acquisition::AcquisitionLoop;
use vanlog_core::clock::MockRtc;
use vanlog_core::config::LoggerConfig;
use vanlog_core::sensor::ScriptedSensor;
use vanlog_core::storage::{FsVolume, MemoryVolume};
use vanlog_core::time::{CountingDelay, DateTime, BUILD_TIME};
use vanlog_core::FILE_HEADER;

fn short_config() -> LoggerConfig {
    LoggerConfig {
        filename: "data.txt",
        sample_delay_ms: 1000,
        interval_secs: 3.0,
        settle_delay_ms: 1000,
    }
}

fn afternoon() -> DateTime {
    DateTime {
        year: 2026,
        month: 8,
        day: 27,
        hour: 15,
        minute: 45,
        second: 9,
    }
}

#[test]
fn one_interval_end_to_end() {
    let sensor = ScriptedSensor::new(&[40.0, 42.0, 44.0], &[20.0, 21.0, 22.0]);
    let rtc = MockRtc::new(afternoon()).with_temperature(30.5);
    let mut logger = AcquisitionLoop::new(
        short_config(),
        sensor,
        rtc,
        MemoryVolume::new(),
        CountingDelay::new(),
    );

    logger.start().unwrap();
    let record = logger.run_interval();

    assert_eq!(record.humidity, 42.0);
    assert_eq!(record.temperature, 21.0);
    assert_eq!(record.rtc_temperature, 30.5);
    assert_eq!(record.timestamp, afternoon());

    let contents = logger.storage().volume().contents("data.txt").unwrap();
    let expected = format!("{FILE_HEADER}\n27/8/2026 15:45:9\t42\t21\t30.5\n");
    assert_eq!(contents, expected.as_bytes());
}

#[test]
fn records_accumulate_without_repeating_the_header() {
    let sensor = ScriptedSensor::new(&[50.0], &[20.0]);
    let mut logger = AcquisitionLoop::new(
        short_config(),
        sensor,
        MockRtc::new(afternoon()),
        MemoryVolume::new(),
        CountingDelay::new(),
    );

    logger.start().unwrap();
    logger.run_interval();
    logger.run_interval();

    let contents = logger.storage().volume().contents("data.txt").unwrap();
    let text = core::str::from_utf8(contents).unwrap();

    assert_eq!(text.matches(FILE_HEADER).count(), 1);
    assert_eq!(text.lines().count(), 3); // header + two records
}

#[test]
fn nan_sample_writes_a_nan_record() {
    let sensor = ScriptedSensor::new(&[40.0, f32::NAN, 44.0], &[20.0]);
    let mut logger = AcquisitionLoop::new(
        short_config(),
        sensor,
        MockRtc::new(afternoon()),
        MemoryVolume::new(),
        CountingDelay::new(),
    );

    logger.start().unwrap();
    let record = logger.run_interval();

    // One bad transaction poisons the interval mean, and the record is
    // written regardless.
    assert!(record.humidity.is_nan());
    assert_eq!(record.temperature, 20.0);

    let contents = logger.storage().volume().contents("data.txt").unwrap();
    let text = core::str::from_utf8(contents).unwrap();
    assert!(text.contains("\tNaN\t"));
}

#[test]
fn lost_power_calibration_lands_before_the_first_sample() {
    let sensor = ScriptedSensor::new(&[50.0], &[20.0]);
    let rtc = MockRtc::new(afternoon()).with_lost_power();
    let mut logger = AcquisitionLoop::new(
        short_config(),
        sensor,
        rtc,
        MemoryVolume::new(),
        CountingDelay::new(),
    );

    logger.start().unwrap();
    let record = logger.run_interval();

    // The clock was reset to the build timestamp during startup, so the
    // very first record carries it.
    assert_eq!(record.timestamp, BUILD_TIME);
}

#[test]
fn filesystem_volume_survives_process_restarts() {
    let dir = tempfile::tempdir().unwrap();

    let run_once = || {
        let sensor = ScriptedSensor::new(&[50.0], &[20.0]);
        let mut logger = AcquisitionLoop::new(
            short_config(),
            sensor,
            MockRtc::new(afternoon()),
            FsVolume::new(dir.path()),
            CountingDelay::new(),
        );
        logger.start().unwrap();
        logger.run_interval();
    };

    // Two separate "boots" against the same card.
    run_once();
    run_once();

    let text = std::fs::read_to_string(dir.path().join("data.txt")).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(FILE_HEADER));
    assert_eq!(lines.clone().count(), 2);
    for line in lines {
        assert_eq!(line, "27/8/2026 15:45:9\t50\t20\t25");
    }
}
