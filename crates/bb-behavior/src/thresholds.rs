//! Trigger cutoffs for the stock behaviors.
//!
//! These were hand-tuned on the physical robot and vary with lighting and
//! floor surface, so they are configuration rather than constants.

use crate::{BehaviorError, BehaviorResult};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Thresholds {
    /// `AvoidObstacle` engages below this distance (cm).
    pub obstacle_cm: f64,

    /// `CollisionStop` engages below this distance (cm).
    pub collision_cm: f64,

    /// `KeepInArea` engages when the darkest reflectance sample is below
    /// this value (0 = black, 1 = white).
    pub line_dark: f64,

    /// `FoundTarget` engages at or above this color-match fraction.
    pub target_fraction: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            obstacle_cm:     20.0,
            collision_cm:    5.0,
            line_dark:       0.3,
            target_fraction: 0.4,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> BehaviorResult<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(BehaviorError::Config(format!("{name} must be positive, got {v}")))
            }
        };
        positive("obstacle_cm", self.obstacle_cm)?;
        positive("collision_cm", self.collision_cm)?;
        positive("line_dark", self.line_dark)?;
        positive("target_fraction", self.target_fraction)?;

        if self.collision_cm >= self.obstacle_cm {
            return Err(BehaviorError::Config(format!(
                "collision_cm ({}) must be below obstacle_cm ({})",
                self.collision_cm, self.obstacle_cm
            )));
        }
        if self.line_dark > 1.0 || self.target_fraction > 1.0 {
            return Err(BehaviorError::Config(
                "line_dark and target_fraction must be at most 1".into(),
            ));
        }
        Ok(())
    }
}
