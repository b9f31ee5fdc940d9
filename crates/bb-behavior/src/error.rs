use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior '{name}' has invalid priority {priority} (must be finite and >= 0)")]
    InvalidPriority { name: String, priority: f64 },

    #[error("too many behaviors registered (max {max})")]
    RegistryFull { max: usize },

    #[error("behavior configuration error: {0}")]
    Config(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
