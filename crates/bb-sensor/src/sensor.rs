//! The `Sensor` trait: what the controller needs from a sensor driver.

use crate::{SensorResult, SensorValue};

/// One logical sensor channel.
///
/// The controller calls [`refresh`](Self::refresh) exactly once at the start
/// of every tick, any number of [`read`](Self::read)s while behaviors run,
/// and [`reset`](Self::reset) exactly once after the motor command is sent.
///
/// `read` is infallible: a channel that cannot produce a reading must report
/// it from `refresh`, where the controller stops the run.
pub trait Sensor: Send + 'static {
    /// Human-readable channel name used in logs and errors.
    fn name(&self) -> &str;

    /// Sample the hardware and store the new reading.
    fn refresh(&mut self) -> SensorResult<()>;

    /// The reading stored by the last `refresh` (or `reset`).
    fn read(&self) -> SensorValue;

    /// Return the channel to a ready state for the next cycle.
    ///
    /// Default: nothing to re-arm.
    fn reset(&mut self) -> SensorResult<()> {
        Ok(())
    }
}
