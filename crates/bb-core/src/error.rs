//! Framework error type.
//!
//! Sub-crates define their own error enums; `BbError` covers the failures
//! that belong to no single subsystem, which today means configuration.

use thiserror::Error;

/// The top-level error type for `bb-core`.
#[derive(Debug, Error)]
pub enum BbError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `bb-core`.
pub type BbResult<T> = Result<T, BbError>;
