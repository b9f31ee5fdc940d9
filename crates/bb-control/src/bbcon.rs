//! The `Bbcon` controller and its run loop.

use bb_behavior::{BehaviorContext, Registry};
use bb_core::{ArbiterRng, BehaviorId, ControllerConfig, LoopClock, MotorCommand, SensorId, Tick};
use bb_motor::Actuator;
use bb_sensor::SensorBank;
use tracing::{debug, error, info};

use crate::{Arbitrator, ControlError, ControlResult, ControllerObserver, Decision, Pacer};

/// Why [`Bbcon::run`] returned.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StopReason {
    /// A selected behavior requested halt.
    Halted,
    /// `config.max_ticks` cycles completed without a halt.
    TickLimit,
}

/// Result of a completed run.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct RunSummary {
    /// Cycles executed, including the halting one.
    pub ticks:  u64,
    pub reason: StopReason,
    /// The behavior whose halt request ended the run.
    pub halted_by: Option<BehaviorId>,
}

/// Behavior-based controller: one per robot run.
///
/// `Bbcon<A, P>` owns the sensors, the behavior registry, the actuator, and
/// the halt flag, and drives the seven-step tick described in the crate docs.
///
/// Create via [`BbconBuilder`][crate::BbconBuilder].
pub struct Bbcon<A: Actuator, P: Pacer> {
    pub(crate) config:     ControllerConfig,
    pub(crate) clock:      LoopClock,
    pub(crate) sensors:    SensorBank,
    pub(crate) sensor_ids: Vec<SensorId>,
    pub(crate) registry:   Registry,
    pub(crate) arbitrator: Arbitrator,
    pub(crate) rng:        ArbiterRng,
    pub(crate) actuator:   A,
    pub(crate) pacer:      P,
    pub(crate) halted:     bool,
    pub(crate) halted_by:  Option<BehaviorId>,
    pub(crate) last:       Option<Decision>,
}

impl<A: Actuator, P: Pacer> Bbcon<A, P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until a selected behavior requests halt, or until
    /// `config.max_ticks` cycles have run.
    ///
    /// A sensor or actuator failure ends the run with that error after a
    /// best-effort stop command.
    pub fn run<O: ControllerObserver>(&mut self, observer: &mut O) -> ControlResult<RunSummary> {
        let start = self.clock.current_tick;
        let reason = loop {
            if self.halted {
                break StopReason::Halted;
            }
            if self.config.max_ticks.is_some_and(|max| self.clock.current_tick.0 >= max) {
                break StopReason::TickLimit;
            }
            self.step(observer)?;
        };

        let summary = RunSummary {
            ticks: self.clock.current_tick.since(start),
            reason,
            halted_by: self.halted_by,
        };
        info!(ticks = summary.ticks, ?reason, "run finished");
        observer.on_run_end(&summary);
        Ok(summary)
    }

    /// Run at most `n` cycles, stopping early on halt.  Returns how many ran.
    pub fn run_ticks<O: ControllerObserver>(&mut self, n: u64, observer: &mut O) -> ControlResult<u64> {
        let mut ran = 0;
        while ran < n && !self.halted {
            self.step(observer)?;
            ran += 1;
        }
        Ok(ran)
    }

    /// Execute exactly one controller cycle.
    ///
    /// Returns [`ControlError::Halted`] without touching sensors or the
    /// actuator if the halt flag is already set.
    pub fn step<O: ControllerObserver>(&mut self, observer: &mut O) -> ControlResult<Decision> {
        if self.halted {
            return Err(ControlError::Halted);
        }
        match self.cycle(observer) {
            Ok(decision) => Ok(decision),
            Err(e) => {
                error!(tick = %self.clock.current_tick, error = %e, "collaborator failure; stopping motors");
                // Best effort: the drive may be the thing that failed.
                let _ = self.actuator.apply(MotorCommand::STOP);
                Err(e)
            }
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn clock(&self) -> &LoopClock {
        &self.clock
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn sensors(&self) -> &SensorBank {
        &self.sensors
    }

    /// Sensor channels refreshed and reset each tick.
    pub fn sensor_ids(&self) -> &[SensorId] {
        &self.sensor_ids
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn arbitrator(&self) -> Arbitrator {
        self.arbitrator
    }

    /// The decision taken on the most recent tick.
    pub fn last_decision(&self) -> Option<&Decision> {
        self.last.as_ref()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn cycle<O: ControllerObserver>(&mut self, observer: &mut O) -> ControlResult<Decision> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        // ① Refresh each referenced channel exactly once.
        self.sensors.refresh(&self.sensor_ids)?;

        // ② Update behaviors in registration order.
        let ctx = BehaviorContext::new(now, &self.sensors);
        for transition in self.registry.update_all(&ctx) {
            observer.on_transition(&transition);
        }

        // ③ Arbitrate over the active set.
        let candidates = self.registry.candidates();
        let decision = self.arbitrator.choose(&candidates, &mut self.rng);
        debug!(
            tick = %now,
            active = candidates.len(),
            winner = ?decision.winner,
            command = %decision.command,
            halt = decision.halt_request,
            "decision"
        );

        // ④ Actuate.
        self.actuator.apply(decision.command)?;

        // ⑤ Record the halt request.
        self.halted = decision.halt_request;
        if self.halted {
            self.halted_by = decision.winner;
        }
        self.last = Some(decision);

        // ⑥ Re-arm sensors for the next cycle.
        self.sensors.reset(&self.sensor_ids)?;

        observer.on_decision(now, &decision);
        observer.on_tick_end(now, self.registry.active().len());
        self.clock.advance();

        if self.halted {
            info!(tick = %now, winner = ?decision.winner, "halt requested");
            observer.on_halt(now, decision.winner);
        } else {
            // ⑦ Pace.
            self.pacer.pace(self.clock.period);
        }
        Ok(decision)
    }
}
