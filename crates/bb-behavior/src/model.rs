//! The `Behavior` trait: the main extension point for robot competences.

use bb_core::{BehaviorRng, MotorCommand, SensorId};

use crate::BehaviorContext;

/// What an active behavior wants this tick.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Proposal {
    /// How well current conditions match the behavior's trigger, in `[0, 1]`.
    /// Out-of-range and NaN values are clamped by the slot.
    pub match_degree: f64,
    /// The command issued if this behavior wins arbitration.
    pub command: MotorCommand,
}

impl Proposal {
    pub fn new(match_degree: f64, command: MotorCommand) -> Self {
        Self { match_degree, command }
    }

    /// Zero match; used when the expected reading is missing.
    pub fn idle() -> Self {
        Self { match_degree: 0.0, command: MotorCommand::STOP }
    }
}

/// One independent robot competence.
///
/// The controller owns each behavior inside a
/// [`BehaviorSlot`][crate::BehaviorSlot], which tracks activation state and
/// derives `weight = priority * match_degree`.  Implementors only decide
/// *when* they apply and *what* they propose.
///
/// # Required methods
///
/// `name`, `priority`, the two activation predicates, and `sense_and_act`.
/// `halt_request`, `starts_active`, and `sensors` have defaults suited to a
/// reactive, non-halting behavior with no sensor dependencies.
///
/// # Example
///
/// ```rust,ignore
/// struct Cruise;
///
/// impl Behavior for Cruise {
///     fn name(&self) -> &str { "cruise" }
///     fn priority(&self) -> f64 { 0.5 }
///     fn starts_active(&self) -> bool { true }
///     fn consider_activation(&mut self, _: &BehaviorContext<'_>) -> bool { true }
///     fn consider_deactivation(&mut self, _: &BehaviorContext<'_>) -> bool { false }
///     fn sense_and_act(&mut self, _: &BehaviorContext<'_>, _: &mut BehaviorRng) -> Proposal {
///         Proposal::new(1.0, MotorCommand::forward(0.5))
///     }
/// }
/// ```
pub trait Behavior: Send + 'static {
    /// Stable name; the registry treats two behaviors with the same name as
    /// the same handle.
    fn name(&self) -> &str;

    /// Designer-assigned importance.  Must be finite and non-negative.
    fn priority(&self) -> f64;

    /// Whether winning arbitration ends the run.
    fn halt_request(&self) -> bool {
        false
    }

    /// Initial activation state.  Default-style behaviors return `true`.
    fn starts_active(&self) -> bool {
        false
    }

    /// Sensor channels this behavior reads.  The controller refreshes the
    /// union of these once per tick.
    fn sensors(&self) -> &[SensorId] {
        &[]
    }

    /// Called only while inactive: should the behavior become a candidate?
    fn consider_activation(&mut self, ctx: &BehaviorContext<'_>) -> bool;

    /// Called only while active: should the behavior stop being a candidate?
    fn consider_deactivation(&mut self, ctx: &BehaviorContext<'_>) -> bool;

    /// Called only when the behavior ends the tick active.
    fn sense_and_act(&mut self, ctx: &BehaviorContext<'_>, rng: &mut BehaviorRng) -> Proposal;
}
