use bb_core::{BehaviorRng, MotorCommand, SensorId};

use super::shortfall;
use crate::{Behavior, BehaviorContext, Proposal, Thresholds};

/// Steers away from obstacles reported by a distance channel.
///
/// Turns left while the obstacle is moderately close and reverses once it is
/// within twice the collision distance.
pub struct AvoidObstacle {
    sensors:    [SensorId; 1],
    priority:   f64,
    trigger_cm: f64,
    backoff_cm: f64,
}

impl AvoidObstacle {
    pub fn new(sensor: SensorId, thresholds: &Thresholds, priority: f64) -> Self {
        Self {
            sensors: [sensor],
            priority,
            trigger_cm: thresholds.obstacle_cm,
            backoff_cm: thresholds.collision_cm * 2.0,
        }
    }

    fn triggered(&self, ctx: &BehaviorContext<'_>) -> bool {
        ctx.distance(self.sensors[0]).is_some_and(|d| d < self.trigger_cm)
    }
}

impl Behavior for AvoidObstacle {
    fn name(&self) -> &str {
        "avoid_obstacle"
    }

    fn priority(&self) -> f64 {
        self.priority
    }

    fn sensors(&self) -> &[SensorId] {
        &self.sensors
    }

    fn consider_activation(&mut self, ctx: &BehaviorContext<'_>) -> bool {
        self.triggered(ctx)
    }

    fn consider_deactivation(&mut self, ctx: &BehaviorContext<'_>) -> bool {
        !self.triggered(ctx)
    }

    fn sense_and_act(&mut self, ctx: &BehaviorContext<'_>, _rng: &mut BehaviorRng) -> Proposal {
        let Some(d) = ctx.distance(self.sensors[0]) else {
            return Proposal::idle();
        };
        let command = if d < self.backoff_cm {
            MotorCommand::backward(0.5)
        } else {
            MotorCommand::left(0.6)
        };
        Proposal::new(shortfall(d, self.trigger_cm), command)
    }
}
