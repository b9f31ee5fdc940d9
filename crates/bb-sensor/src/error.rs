use thiserror::Error;

use bb_core::SensorId;

#[derive(Debug, Error)]
pub enum SensorError {
    /// The channel can no longer produce readings; the run must stop.
    #[error("sensor '{name}' failed permanently: {reason}")]
    Failed { name: String, reason: String },

    #[error("sensor {0} is not registered")]
    Unknown(SensorId),

    #[error("sensor bank is full (max {max} channels)")]
    BankFull { max: usize },
}

pub type SensorResult<T> = Result<T, SensorError>;
