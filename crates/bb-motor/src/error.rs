use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActuatorError {
    /// The drive can no longer execute commands; the run must stop.
    #[error("actuator failed permanently: {0}")]
    Failed(String),
}

pub type ActuatorResult<T> = Result<T, ActuatorError>;
