use bb_core::{BehaviorRng, MotorCommand};

use crate::{Behavior, BehaviorContext, Proposal};

/// Default behavior: always active, drives forward and turns at random.
///
/// Give it a low priority so any triggered reactive behavior outbids it.
pub struct Wander {
    priority:    f64,
    speed:       f64,
    turn_chance: f64,
}

impl Wander {
    pub fn new(priority: f64) -> Self {
        Self { priority, speed: 0.5, turn_chance: 0.2 }
    }

    /// Probability per tick of turning instead of driving straight.
    pub fn with_turn_chance(mut self, p: f64) -> Self {
        self.turn_chance = p;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }
}

impl Behavior for Wander {
    fn name(&self) -> &str {
        "wander"
    }

    fn priority(&self) -> f64 {
        self.priority
    }

    fn starts_active(&self) -> bool {
        true
    }

    fn consider_activation(&mut self, _ctx: &BehaviorContext<'_>) -> bool {
        true
    }

    fn consider_deactivation(&mut self, _ctx: &BehaviorContext<'_>) -> bool {
        false
    }

    fn sense_and_act(&mut self, _ctx: &BehaviorContext<'_>, rng: &mut BehaviorRng) -> Proposal {
        let command = if rng.gen_bool(self.turn_chance) {
            if rng.gen_bool(0.5) {
                MotorCommand::left(self.speed)
            } else {
                MotorCommand::right(self.speed)
            }
        } else {
            MotorCommand::forward(self.speed)
        };
        Proposal::new(1.0, command)
    }
}
