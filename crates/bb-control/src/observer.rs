//! Controller observer trait for progress reporting and trace collection.

use bb_behavior::Transition;
use bb_core::{BehaviorId, Tick};

use crate::{Decision, RunSummary};

/// Callbacks invoked by [`Bbcon::step`][crate::Bbcon::step] and
/// [`Bbcon::run`][crate::Bbcon::run] at key points in the loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: decision printer
///
/// ```rust,ignore
/// struct PrintDecisions;
///
/// impl ControllerObserver for PrintDecisions {
///     fn on_decision(&mut self, tick: Tick, decision: &Decision) {
///         println!("{tick}: {}", decision.command);
///     }
/// }
/// ```
pub trait ControllerObserver {
    /// Called at the very start of each tick, before sensors are refreshed.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called for every activation change during the update phase.
    fn on_transition(&mut self, _transition: &Transition) {}

    /// Called after the decision was applied and sensors were reset.
    fn on_decision(&mut self, _tick: Tick, _decision: &Decision) {}

    /// Called at the end of each tick with the number of active behaviors.
    fn on_tick_end(&mut self, _tick: Tick, _active: usize) {}

    /// Called once, on the tick whose winner requested halt.
    fn on_halt(&mut self, _tick: Tick, _winner: Option<BehaviorId>) {}

    /// Called once when [`Bbcon::run`][crate::Bbcon::run] returns normally.
    fn on_run_end(&mut self, _summary: &RunSummary) {}
}

/// A [`ControllerObserver`] that does nothing.
pub struct NoopObserver;

impl ControllerObserver for NoopObserver {}
