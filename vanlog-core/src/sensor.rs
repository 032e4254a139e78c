//! Sensor Source - instantaneous humidity/temperature readings
//!
//! The engine only needs two capabilities from the environmental sensor:
//! read humidity, read temperature. Both are instantaneous samples consumed
//! straight into the interval accumulator.
//!
//! ## Failure Contract
//!
//! DHT-class drivers signal a failed transaction by returning NaN instead of
//! an `Err`. This trait keeps that contract: implementations return NaN and
//! the engine does not filter or retry. A single NaN sample therefore poisons
//! the whole interval's mean - see `sampling` for why that is left alone.

/// Humidity/temperature sensor behind a single data pin.
pub trait EnvironmentSensor {
    /// Bring up the sensor. DHT-class parts need no handshake, so failure is
    /// not modeled here; a dead sensor simply reads NaN forever.
    fn begin(&mut self);

    /// Relative humidity in percent, or NaN if the transaction failed.
    fn read_humidity(&mut self) -> f32;

    /// Temperature in degrees Celsius, or NaN if the transaction failed.
    fn read_temperature(&mut self) -> f32;
}

/// Replay sensor for tests, demos, and simulation.
///
/// Cycles through fixed humidity and temperature sequences, one element per
/// read. Feed it NaN entries to simulate failed transactions.
///
/// ## Example
///
/// ```
/// use vanlog_core::sensor::{EnvironmentSensor, ScriptedSensor};
///
/// let mut sensor = ScriptedSensor::new(&[40.0, 42.0], &[20.0]);
/// assert_eq!(sensor.read_humidity(), 40.0);
/// assert_eq!(sensor.read_humidity(), 42.0);
/// assert_eq!(sensor.read_humidity(), 40.0); // wraps around
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedSensor<'a> {
    humidity: &'a [f32],
    temperature: &'a [f32],
    humidity_pos: usize,
    temperature_pos: usize,
    reads: u32,
}

impl<'a> ScriptedSensor<'a> {
    /// Create a sensor that replays the given sequences.
    ///
    /// Either slice may be empty, in which case the corresponding channel
    /// reads NaN - the same thing a disconnected sensor would produce.
    pub fn new(humidity: &'a [f32], temperature: &'a [f32]) -> Self {
        Self {
            humidity,
            temperature,
            humidity_pos: 0,
            temperature_pos: 0,
            reads: 0,
        }
    }

    /// Total reads across both channels. Lets tests assert that nothing was
    /// sampled before startup completed.
    pub fn reads(&self) -> u32 {
        self.reads
    }

    fn next(script: &[f32], pos: &mut usize) -> f32 {
        match script.get(*pos) {
            Some(&value) => {
                *pos = (*pos + 1) % script.len();
                value
            }
            None => f32::NAN,
        }
    }
}

impl EnvironmentSensor for ScriptedSensor<'_> {
    fn begin(&mut self) {}

    fn read_humidity(&mut self) -> f32 {
        self.reads += 1;
        Self::next(self.humidity, &mut self.humidity_pos)
    }

    fn read_temperature(&mut self) -> f32 {
        self.reads += 1;
        Self::next(self.temperature, &mut self.temperature_pos)
    }
}
