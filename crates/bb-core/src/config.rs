//! Controller run configuration.
//!
//! Typically loaded from a JSON file by the application crate (with the
//! `serde` feature) and passed to the controller builder.

use std::time::Duration;

use crate::{BbError, BbResult};

/// Which arbitration algorithm the controller consults each tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SelectionPolicy {
    /// Highest weight wins; ties go to the earliest-registered behavior.
    #[default]
    Deterministic,
    /// Weighted lottery over the active behaviors.
    Stochastic,
}

/// Top-level controller configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    /// Master RNG seed.  The same seed and sensor trace always produce the
    /// same command sequence.
    pub seed: u64,

    /// Arbitration algorithm.
    pub policy: SelectionPolicy,

    /// Loop period in milliseconds.  The original robot paced at 500 ms.
    pub period_ms: u64,

    /// Upper bound on cycles for runs that never halt.  `None` = unbounded.
    pub max_ticks: Option<u64>,

    /// Speed applied by the motor unit when a command carries none.
    pub default_speed: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            seed:          0,
            policy:        SelectionPolicy::Deterministic,
            period_ms:     500,
            max_ticks:     None,
            default_speed: 0.5,
        }
    }
}

impl ControllerConfig {
    #[inline]
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    /// Reject values the controller cannot run with.
    pub fn validate(&self) -> BbResult<()> {
        if !(0.0..=1.0).contains(&self.default_speed) {
            return Err(BbError::Config(format!(
                "default_speed must be in [0, 1], got {}",
                self.default_speed
            )));
        }
        if self.max_ticks == Some(0) {
            return Err(BbError::Config("max_ticks must be positive when set".into()));
        }
        Ok(())
    }
}
