use bb_core::{BehaviorRng, MotorCommand, SensorId};

use super::shortfall;
use crate::{Behavior, BehaviorContext, Proposal, Thresholds};

/// Keeps the robot inside an arena bounded by a dark line.
pub struct KeepInArea {
    sensors:  [SensorId; 1],
    priority: f64,
    dark:     f64,
}

impl KeepInArea {
    pub fn new(sensor: SensorId, thresholds: &Thresholds, priority: f64) -> Self {
        Self { sensors: [sensor], priority, dark: thresholds.line_dark }
    }

    fn on_line(&self, ctx: &BehaviorContext<'_>) -> bool {
        ctx.darkest(self.sensors[0]).is_some_and(|v| v < self.dark)
    }
}

impl Behavior for KeepInArea {
    fn name(&self) -> &str {
        "keep_in_area"
    }

    fn priority(&self) -> f64 {
        self.priority
    }

    fn sensors(&self) -> &[SensorId] {
        &self.sensors
    }

    fn consider_activation(&mut self, ctx: &BehaviorContext<'_>) -> bool {
        self.on_line(ctx)
    }

    fn consider_deactivation(&mut self, ctx: &BehaviorContext<'_>) -> bool {
        !self.on_line(ctx)
    }

    fn sense_and_act(&mut self, ctx: &BehaviorContext<'_>, _rng: &mut BehaviorRng) -> Proposal {
        match ctx.darkest(self.sensors[0]) {
            Some(v) => Proposal::new(shortfall(v, self.dark), MotorCommand::backward(0.6)),
            None => Proposal::idle(),
        }
    }
}
