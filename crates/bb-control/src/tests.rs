//! Integration tests for bb-control.

use bb_behavior::{
    AvoidObstacle, Behavior, BehaviorContext, Candidate, CollisionStop, Proposal, Thresholds, Transition, Wander,
};
use bb_core::{
    ArbiterRng, BehaviorId, BehaviorRng, ControllerConfig, MotorAction, MotorCommand, SelectionPolicy, Tick,
};
use bb_motor::RecordingActuator;
use bb_sensor::{ScriptedSensor, SensorBank, SensorValue};

use crate::{Arbitrator, BbconBuilder, ControlError, ControllerObserver, Decision, Fallback, NoopObserver, StopReason};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn cand(id: u16, weight: f64) -> Candidate {
    Candidate {
        id:           BehaviorId(id),
        weight,
        command:      MotorCommand::forward(0.1 * (id as f64 + 1.0)),
        halt_request: false,
    }
}

fn config(policy: SelectionPolicy) -> ControllerConfig {
    ControllerConfig { seed: 42, policy, period_ms: 0, ..Default::default() }
}

/// Always-active behavior with a fixed bid.
struct Fixed {
    name:         &'static str,
    priority:     f64,
    match_degree: f64,
    command:      MotorCommand,
    halt:         bool,
}

impl Fixed {
    fn new(name: &'static str, priority: f64, match_degree: f64, command: MotorCommand) -> Self {
        Self { name, priority, match_degree, command, halt: false }
    }
}

impl Behavior for Fixed {
    fn name(&self) -> &str {
        self.name
    }
    fn priority(&self) -> f64 {
        self.priority
    }
    fn halt_request(&self) -> bool {
        self.halt
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
    fn sense_and_act(&mut self, _ctx: &BehaviorContext<'_>, _rng: &mut BehaviorRng) -> Proposal {
        Proposal::new(self.match_degree, self.command)
    }
}

/// Observer that records everything it is told.
#[derive(Default)]
struct Recorder {
    starts:      Vec<Tick>,
    transitions: Vec<Transition>,
    decisions:   Vec<Decision>,
    halts:       Vec<(Tick, Option<BehaviorId>)>,
    runs_ended:  usize,
}

impl ControllerObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }
    fn on_transition(&mut self, transition: &Transition) {
        self.transitions.push(*transition);
    }
    fn on_decision(&mut self, _tick: Tick, decision: &Decision) {
        self.decisions.push(*decision);
    }
    fn on_halt(&mut self, tick: Tick, winner: Option<BehaviorId>) {
        self.halts.push((tick, winner));
    }
    fn on_run_end(&mut self, _summary: &crate::RunSummary) {
        self.runs_ended += 1;
    }
}

// ── Deterministic arbitration ─────────────────────────────────────────────────

#[cfg(test)]
mod deterministic_tests {
    use super::*;

    #[test]
    fn heaviest_wins() {
        // A(priority 1, match 0.4) and B(priority 5, match 0.6).
        let d = Arbitrator::choose_deterministic(&[cand(0, 0.4), cand(1, 3.0)]);
        assert_eq!(d.winner, Some(BehaviorId(1)));
        assert_eq!(d.command, cand(1, 3.0).command);
        assert_eq!(d.fallback, None);
    }

    #[test]
    fn tie_goes_to_earliest_registered() {
        let d = Arbitrator::choose_deterministic(&[cand(2, 1.0), cand(3, 5.0), cand(7, 5.0), cand(9, 5.0)]);
        assert_eq!(d.winner, Some(BehaviorId(3)));
    }

    #[test]
    fn all_zero_picks_first() {
        let d = Arbitrator::choose_deterministic(&[cand(4, 0.0), cand(5, 0.0)]);
        assert_eq!(d.winner, Some(BehaviorId(4)));
    }

    #[test]
    fn empty_set_stops_without_halting() {
        let d = Arbitrator::choose_deterministic(&[]);
        assert_eq!(d, Decision::idle());
        assert!(d.command.is_stop());
        assert!(!d.halt_request);
        assert_eq!(d.fallback, Some(Fallback::EmptyActiveSet));
    }

    #[test]
    fn halt_request_carried() {
        let mut c = cand(0, 1.0);
        c.halt_request = true;
        assert!(Arbitrator::choose_deterministic(&[c]).halt_request);
    }

    #[test]
    fn policy_dispatch() {
        let mut rng = ArbiterRng::new(0);
        let arb = Arbitrator::new(SelectionPolicy::Deterministic);
        assert_eq!(arb.policy(), SelectionPolicy::Deterministic);
        for _ in 0..20 {
            assert_eq!(arb.choose(&[cand(0, 1.0), cand(1, 2.0)], &mut rng).winner, Some(BehaviorId(1)));
        }
    }
}

// ── Stochastic arbitration ────────────────────────────────────────────────────

#[cfg(test)]
mod stochastic_tests {
    use super::*;

    #[test]
    fn frequencies_converge_to_weight_share() {
        let candidates = [cand(0, 1.0), cand(1, 2.0), cand(2, 3.0), cand(3, 4.0)];
        let mut rng = ArbiterRng::new(2024);
        let mut counts = [0usize; 4];
        let draws = 40_000;
        for _ in 0..draws {
            let d = Arbitrator::choose_stochastic(&candidates, &mut rng);
            counts[d.winner.unwrap().index()] += 1;
        }
        for (i, &n) in counts.iter().enumerate() {
            let expected = candidates[i].weight / 10.0;
            let got = n as f64 / draws as f64;
            assert!((got - expected).abs() < 0.015, "behavior {i}: expected {expected}, got {got}");
        }
    }

    #[test]
    fn zero_weight_never_wins_against_positive() {
        let candidates = [cand(0, 0.0), cand(1, 0.5), cand(2, 0.0)];
        let mut rng = ArbiterRng::new(1);
        for _ in 0..2_000 {
            let d = Arbitrator::choose_stochastic(&candidates, &mut rng);
            assert_eq!(d.winner, Some(BehaviorId(1)));
            assert_eq!(d.fallback, None);
        }
    }

    #[test]
    fn lone_zero_weight_candidate_still_selected() {
        let mut rng = ArbiterRng::new(3);
        let d = Arbitrator::choose_stochastic(&[cand(5, 0.0)], &mut rng);
        assert_eq!(d.winner, Some(BehaviorId(5)));
        assert_eq!(d.fallback, Some(Fallback::ZeroTotalWeight));
    }

    #[test]
    fn zero_total_falls_back_to_uniform() {
        let candidates = [cand(0, 0.0), cand(1, 0.0), cand(2, 0.0)];
        let mut rng = ArbiterRng::new(5);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let d = Arbitrator::choose_stochastic(&candidates, &mut rng);
            seen[d.winner.unwrap().index()] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn empty_set_stops() {
        let mut rng = ArbiterRng::new(0);
        assert_eq!(Arbitrator::choose_stochastic(&[], &mut rng), Decision::idle());
    }

    #[test]
    fn same_seed_same_choices() {
        let candidates = [cand(0, 1.0), cand(1, 1.0), cand(2, 1.0)];
        let mut r1 = ArbiterRng::new(77);
        let mut r2 = ArbiterRng::new(77);
        for _ in 0..100 {
            assert_eq!(
                Arbitrator::choose_stochastic(&candidates, &mut r1),
                Arbitrator::choose_stochastic(&candidates, &mut r2),
            );
        }
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use bb_core::SensorId;

    use super::*;

    #[test]
    fn no_behaviors_rejected() {
        let result = BbconBuilder::new(config(SelectionPolicy::Deterministic), RecordingActuator::new()).build();
        assert!(matches!(result, Err(ControlError::NoBehaviors)));
    }

    #[test]
    fn unknown_sensor_rejected() {
        let th = Thresholds::default();
        let result = BbconBuilder::new(config(SelectionPolicy::Deterministic), RecordingActuator::new())
            .behavior(AvoidObstacle::new(SensorId(0), &th, 1.0))
            .build();
        assert!(matches!(result, Err(ControlError::UnknownSensor { sensor: SensorId(0), .. })));
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = ControllerConfig { default_speed: -1.0, ..Default::default() };
        let result = BbconBuilder::new(cfg, RecordingActuator::new())
            .behavior(Wander::new(1.0))
            .build();
        assert!(matches!(result, Err(ControlError::Config(_))));
    }

    #[test]
    fn duplicate_behavior_registered_once() {
        let bbcon = BbconBuilder::new(config(SelectionPolicy::Deterministic), RecordingActuator::new())
            .behavior(Wander::new(1.0))
            .behavior(Wander::new(3.0))
            .build()
            .unwrap();
        assert_eq!(bbcon.registry().len(), 1);
    }

    #[test]
    fn only_referenced_sensors_cycled() {
        let th = Thresholds::default();
        let mut bank = SensorBank::new();
        let unused = ScriptedSensor::constant("camera", SensorValue::ColorMatch(0.0));
        let unused_probe = unused.probe();
        bank.add(unused).unwrap();
        let sonar = bank.add(ScriptedSensor::constant("sonar", SensorValue::Distance(50.0))).unwrap();

        let mut bbcon = BbconBuilder::new(config(SelectionPolicy::Deterministic), RecordingActuator::new())
            .sensors(bank)
            .behavior(AvoidObstacle::new(sonar, &th, 1.0))
            .build()
            .unwrap();
        assert_eq!(bbcon.sensor_ids(), &[sonar]);
        bbcon.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(unused_probe.refreshes(), 0);
        assert_eq!(unused_probe.resets(), 0);
    }
}

// ── Controller loop ───────────────────────────────────────────────────────────

#[cfg(test)]
mod loop_tests {
    use super::*;

    #[test]
    fn weights_scenario_selects_b() {
        let actuator = RecordingActuator::new();
        let mut bbcon = BbconBuilder::new(config(SelectionPolicy::Deterministic), actuator.clone())
            .behavior(Fixed::new("a", 1.0, 0.4, MotorCommand::left(0.5)))
            .behavior(Fixed::new("b", 5.0, 0.6, MotorCommand::right(0.5)))
            .build()
            .unwrap();
        let d = bbcon.step(&mut NoopObserver).unwrap();
        assert_eq!(d.winner, Some(BehaviorId(1)));
        assert_eq!(actuator.commands(), vec![MotorCommand::right(0.5)]);
        assert_eq!(bbcon.last_decision(), Some(&d));
    }

    #[test]
    fn shared_sensor_refreshed_and_reset_once_per_tick() {
        let th = Thresholds::default();
        let mut bank = SensorBank::new();
        let sonar = ScriptedSensor::constant("sonar", SensorValue::Distance(50.0));
        let probe = sonar.probe();
        let id = bank.add(sonar).unwrap();

        let mut bbcon = BbconBuilder::new(config(SelectionPolicy::Deterministic), RecordingActuator::new())
            .sensors(bank)
            .behavior(Wander::new(0.5))
            .behavior(AvoidObstacle::new(id, &th, 2.0))
            .behavior(CollisionStop::new(id, &th, 10.0))
            .build()
            .unwrap();
        bbcon.run_ticks(6, &mut NoopObserver).unwrap();
        assert_eq!(probe.refreshes(), 6);
        assert_eq!(probe.resets(), 6);
    }

    #[test]
    fn empty_active_set_stops_and_keeps_running() {
        let th = Thresholds::default();
        let mut bank = SensorBank::new();
        let id = bank.add(ScriptedSensor::constant("sonar", SensorValue::Distance(100.0))).unwrap();
        let actuator = RecordingActuator::new();
        let mut bbcon = BbconBuilder::new(config(SelectionPolicy::Stochastic), actuator.clone())
            .sensors(bank)
            .behavior(AvoidObstacle::new(id, &th, 2.0))
            .build()
            .unwrap();

        let ran = bbcon.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(ran, 5);
        assert!(!bbcon.is_halted());
        assert_eq!(actuator.commands(), vec![MotorCommand::STOP; 5]);
        assert_eq!(bbcon.last_decision().unwrap().fallback, Some(Fallback::EmptyActiveSet));
    }

    #[test]
    fn halt_ends_run_after_halting_tick() {
        let th = Thresholds::default();
        let mut bank = SensorBank::new();
        let trace = [60.0, 40.0, 12.0, 3.0, 3.0, 60.0].map(SensorValue::Distance).to_vec();
        let id = bank.add(ScriptedSensor::new("sonar", trace)).unwrap();
        let actuator = RecordingActuator::new();
        let mut bbcon = BbconBuilder::new(config(SelectionPolicy::Deterministic), actuator.clone())
            .sensors(bank)
            .behavior(Wander::new(0.5).with_turn_chance(0.0))
            .behavior(AvoidObstacle::new(id, &th, 2.0))
            .behavior(CollisionStop::new(id, &th, 10.0))
            .build()
            .unwrap();

        let mut rec = Recorder::default();
        let summary = bbcon.run(&mut rec).unwrap();

        assert_eq!(summary.reason, StopReason::Halted);
        assert_eq!(summary.ticks, 4);
        assert_eq!(summary.halted_by, Some(BehaviorId(2)));
        assert_eq!(rec.halts, vec![(Tick(3), Some(BehaviorId(2)))]);
        assert_eq!(rec.runs_ended, 1);
        assert_eq!(rec.decisions.len(), 4);
        assert!(rec.decisions[3].halt_request);

        let actions: Vec<MotorAction> = actuator.commands().iter().map(|c| c.action).collect();
        assert_eq!(
            actions,
            vec![MotorAction::Forward, MotorAction::Forward, MotorAction::TurnLeft, MotorAction::Stop]
        );

        // No further cycle once halted.
        assert!(matches!(bbcon.step(&mut rec), Err(ControlError::Halted)));
        assert_eq!(actuator.commands().len(), 4);
        assert_eq!(bbcon.run_ticks(10, &mut rec).unwrap(), 0);
        assert_eq!(rec.starts.len(), 4);
    }

    #[test]
    fn obstacle_episode_transitions() {
        let th = Thresholds::default();
        let mut bank = SensorBank::new();
        let trace = [50.0, 15.0, 15.0, 15.0, 50.0, 50.0].map(SensorValue::Distance).to_vec();
        let id = bank.add(ScriptedSensor::new("sonar", trace)).unwrap();
        let actuator = RecordingActuator::new();
        let mut bbcon = BbconBuilder::new(config(SelectionPolicy::Deterministic), actuator.clone())
            .sensors(bank)
            .behavior(Wander::new(0.2).with_turn_chance(0.0))
            .behavior(AvoidObstacle::new(id, &th, 2.0))
            .build()
            .unwrap();

        let mut rec = Recorder::default();
        bbcon.run_ticks(6, &mut rec).unwrap();

        // Activated once at T1, deactivated once at T4: no flicker in between.
        let kinds: Vec<(Tick, bb_behavior::TransitionKind)> =
            rec.transitions.iter().map(|t| (t.tick, t.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (Tick(1), bb_behavior::TransitionKind::Activated),
                (Tick(4), bb_behavior::TransitionKind::Deactivated),
            ]
        );
        let actions: Vec<MotorAction> = actuator.commands().iter().map(|c| c.action).collect();
        assert_eq!(
            actions,
            vec![
                MotorAction::Forward,
                MotorAction::TurnLeft,
                MotorAction::TurnLeft,
                MotorAction::TurnLeft,
                MotorAction::Forward,
                MotorAction::Forward,
            ]
        );
    }

    #[test]
    fn tick_limit_stops_unhalting_run() {
        let cfg = ControllerConfig { max_ticks: Some(7), ..config(SelectionPolicy::Stochastic) };
        let mut bbcon = BbconBuilder::new(cfg, RecordingActuator::new())
            .behavior(Wander::new(1.0))
            .build()
            .unwrap();
        let summary = bbcon.run(&mut NoopObserver).unwrap();
        assert_eq!(summary.reason, StopReason::TickLimit);
        assert_eq!(summary.ticks, 7);
        assert_eq!(bbcon.current_tick(), Tick(7));
        assert!(!bbcon.is_halted());
    }

    #[test]
    fn sensor_failure_stops_run_with_stop_command() {
        let th = Thresholds::default();
        let mut bank = SensorBank::new();
        let sonar = ScriptedSensor::constant("sonar", SensorValue::Distance(50.0)).failing_after(2);
        let id = bank.add(sonar).unwrap();
        let actuator = RecordingActuator::new();
        let mut bbcon = BbconBuilder::new(config(SelectionPolicy::Deterministic), actuator.clone())
            .sensors(bank)
            .behavior(Wander::new(0.5).with_turn_chance(0.0))
            .behavior(AvoidObstacle::new(id, &th, 2.0))
            .build()
            .unwrap();

        let err = bbcon.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, ControlError::Sensor(_)));
        let cmds = actuator.commands();
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds.last(), Some(&MotorCommand::STOP));
        assert!(!bbcon.is_halted());
    }

    /// Drive that accepts `healthy` commands, then fails every call.
    /// Every attempt is logged, including rejected ones.
    #[derive(Clone)]
    struct FailingDrive {
        healthy:  usize,
        attempts: std::sync::Arc<std::sync::Mutex<Vec<MotorCommand>>>,
    }

    impl FailingDrive {
        fn after(healthy: usize) -> Self {
            Self { healthy, attempts: Default::default() }
        }
        fn attempts(&self) -> Vec<MotorCommand> {
            self.attempts.lock().unwrap().clone()
        }
    }

    impl bb_motor::Actuator for FailingDrive {
        fn apply(&mut self, command: MotorCommand) -> bb_motor::ActuatorResult<()> {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(command);
            if attempts.len() > self.healthy {
                return Err(bb_motor::ActuatorError::Failed("motor driver offline".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn actuator_failure_stops_run_without_halting() {
        let drive = FailingDrive::after(2);
        let mut bbcon = BbconBuilder::new(config(SelectionPolicy::Deterministic), drive.clone())
            .behavior(Fixed::new("cruise", 1.0, 1.0, MotorCommand::forward(0.5)))
            .build()
            .unwrap();

        let err = bbcon.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, ControlError::Actuator(_)));
        assert!(!bbcon.is_halted());
        // Two good ticks; the failing tick never completes.
        assert_eq!(bbcon.current_tick(), Tick(2));
        // Third command rejected, then the stop attempt.
        assert_eq!(
            drive.attempts(),
            vec![
                MotorCommand::forward(0.5),
                MotorCommand::forward(0.5),
                MotorCommand::forward(0.5),
                MotorCommand::STOP,
            ]
        );
        assert!(matches!(bbcon.step(&mut NoopObserver), Err(ControlError::Actuator(_))));
        assert_eq!(bbcon.current_tick(), Tick(2));
    }

    #[test]
    fn stochastic_runs_are_reproducible() {
        let run = || {
            let actuator = RecordingActuator::new();
            let mut bbcon = BbconBuilder::new(config(SelectionPolicy::Stochastic), actuator.clone())
                .behavior(Fixed::new("left", 1.0, 1.0, MotorCommand::left(0.5)))
                .behavior(Fixed::new("right", 1.0, 1.0, MotorCommand::right(0.5)))
                .build()
                .unwrap();
            bbcon.run_ticks(50, &mut NoopObserver).unwrap();
            actuator.commands()
        };
        let first = run();
        assert_eq!(first, run());
        assert!(first.contains(&MotorCommand::left(0.5)));
        assert!(first.contains(&MotorCommand::right(0.5)));
    }

    #[test]
    fn halting_fixed_behavior_via_step() {
        let mut stopper = Fixed::new("stopper", 1.0, 1.0, MotorCommand::STOP);
        stopper.halt = true;
        let mut bbcon = BbconBuilder::new(config(SelectionPolicy::Deterministic), RecordingActuator::new())
            .behavior(stopper)
            .build()
            .unwrap();
        let d = bbcon.step(&mut NoopObserver).unwrap();
        assert!(d.halt_request);
        assert!(bbcon.is_halted());
        assert_eq!(bbcon.current_tick(), Tick(1));
    }
}

// ── Pacing ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pacer_tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::{Pacer, SleepPacer};

    #[test]
    fn sleep_pacer_waits_out_period() {
        let mut pacer = SleepPacer::new();
        let start = Instant::now();
        pacer.pace(Duration::from_millis(5));
        pacer.pace(Duration::from_millis(5));
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn controller_uses_configured_pacer() {
        let cfg = ControllerConfig { period_ms: 2, ..config(SelectionPolicy::Deterministic) };
        let mut bbcon = BbconBuilder::new(cfg, RecordingActuator::new())
            .behavior(Wander::new(1.0))
            .pacer(SleepPacer::new())
            .build()
            .unwrap();
        let start = Instant::now();
        bbcon.run_ticks(3, &mut NoopObserver).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(6));
        assert_eq!(bbcon.clock().period, Duration::from_millis(2));
    }
}
