use bb_behavior::BehaviorError;
use bb_core::{BbError, SensorId};
use bb_motor::ActuatorError;
use bb_sensor::SensorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error(transparent)]
    Config(#[from] BbError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error("behavior '{behavior}' reads {sensor}, which is not in the sensor bank")]
    UnknownSensor { behavior: String, sensor: SensorId },

    #[error("controller has no behaviors")]
    NoBehaviors,

    #[error("sensor failure: {0}")]
    Sensor(#[from] SensorError),

    #[error("actuator failure: {0}")]
    Actuator(#[from] ActuatorError),

    /// `step` was called after a selected behavior requested halt.
    #[error("controller already halted")]
    Halted,
}

pub type ControlResult<T> = Result<T, ControlError>;
