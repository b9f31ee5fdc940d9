//! Behaviors whose win ends the run.

use bb_core::{BehaviorRng, MotorCommand, SensorId};

use super::shortfall;
use crate::{Behavior, BehaviorContext, Proposal, Thresholds};

/// Stops the robot for good when an obstacle is about to be hit.
pub struct CollisionStop {
    sensors:  [SensorId; 1],
    priority: f64,
    limit_cm: f64,
}

impl CollisionStop {
    pub fn new(sensor: SensorId, thresholds: &Thresholds, priority: f64) -> Self {
        Self { sensors: [sensor], priority, limit_cm: thresholds.collision_cm }
    }

    fn imminent(&self, ctx: &BehaviorContext<'_>) -> bool {
        ctx.distance(self.sensors[0]).is_some_and(|d| d < self.limit_cm)
    }
}

impl Behavior for CollisionStop {
    fn name(&self) -> &str {
        "collision_stop"
    }

    fn priority(&self) -> f64 {
        self.priority
    }

    fn halt_request(&self) -> bool {
        true
    }

    fn sensors(&self) -> &[SensorId] {
        &self.sensors
    }

    fn consider_activation(&mut self, ctx: &BehaviorContext<'_>) -> bool {
        self.imminent(ctx)
    }

    fn consider_deactivation(&mut self, ctx: &BehaviorContext<'_>) -> bool {
        !self.imminent(ctx)
    }

    fn sense_and_act(&mut self, ctx: &BehaviorContext<'_>, _rng: &mut BehaviorRng) -> Proposal {
        match ctx.distance(self.sensors[0]) {
            Some(d) => Proposal::new(shortfall(d, self.limit_cm), MotorCommand::STOP),
            None => Proposal::idle(),
        }
    }
}

/// Stops and ends the run once the camera sees enough of the target color.
pub struct FoundTarget {
    sensors:  [SensorId; 1],
    priority: f64,
    fraction: f64,
}

impl FoundTarget {
    pub fn new(sensor: SensorId, thresholds: &Thresholds, priority: f64) -> Self {
        Self { sensors: [sensor], priority, fraction: thresholds.target_fraction }
    }

    fn sighted(&self, ctx: &BehaviorContext<'_>) -> bool {
        ctx.color_match(self.sensors[0]).is_some_and(|f| f >= self.fraction)
    }
}

impl Behavior for FoundTarget {
    fn name(&self) -> &str {
        "found_target"
    }

    fn priority(&self) -> f64 {
        self.priority
    }

    fn halt_request(&self) -> bool {
        true
    }

    fn sensors(&self) -> &[SensorId] {
        &self.sensors
    }

    fn consider_activation(&mut self, ctx: &BehaviorContext<'_>) -> bool {
        self.sighted(ctx)
    }

    fn consider_deactivation(&mut self, ctx: &BehaviorContext<'_>) -> bool {
        !self.sighted(ctx)
    }

    fn sense_and_act(&mut self, ctx: &BehaviorContext<'_>, _rng: &mut BehaviorRng) -> Proposal {
        match ctx.color_match(self.sensors[0]) {
            Some(f) => Proposal::new(f, MotorCommand::STOP),
            None => Proposal::idle(),
        }
    }
}
