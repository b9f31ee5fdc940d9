//! `BehaviorSlot`: one registered behavior plus its arbitration state.

use bb_core::{BehaviorId, BehaviorRng, MotorCommand};

use crate::{ActiveSet, Behavior, BehaviorContext, Proposal, TransitionKind};

/// Activation state of a behavior.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ActivationState {
    Inactive,
    Active,
}

/// Owns a [`Behavior`] and the state the arbitrator reads from it.
///
/// `weight` is recomputed every time `match_degree` changes and is never
/// stored stale.  While inactive, the last weight and command are kept but
/// the slot is absent from the [`ActiveSet`], so the arbitrator never sees
/// them.
pub struct BehaviorSlot {
    id:           BehaviorId,
    behavior:     Box<dyn Behavior>,
    priority:     f64,
    state:        ActivationState,
    match_degree: f64,
    weight:       f64,
    command:      MotorCommand,
    rng:          BehaviorRng,
}

impl BehaviorSlot {
    pub(crate) fn new(
        id:       BehaviorId,
        behavior: Box<dyn Behavior>,
        priority: f64,
        seed:     u64,
    ) -> Self {
        Self {
            id,
            behavior,
            priority,
            state:        ActivationState::Inactive,
            match_degree: 0.0,
            weight:       0.0,
            command:      MotorCommand::STOP,
            rng:          BehaviorRng::new(seed, id),
        }
    }

    /// Enter the behavior's declared initial state.
    pub(crate) fn enter_initial_state(&mut self, active: &mut ActiveSet) {
        if self.behavior.starts_active() {
            self.state = ActivationState::Active;
            active.insert(self.id);
        }
    }

    /// Run one tick of the state machine.
    ///
    /// Exactly one of the activation checks runs, chosen by the state the
    /// slot entered the tick in.  Returns the transition taken, if any.
    pub(crate) fn update(
        &mut self,
        ctx:    &BehaviorContext<'_>,
        active: &mut ActiveSet,
    ) -> Option<TransitionKind> {
        let transition = match self.state {
            ActivationState::Inactive => {
                if self.behavior.consider_activation(ctx) {
                    self.state = ActivationState::Active;
                    active.insert(self.id);
                    Some(TransitionKind::Activated)
                } else {
                    None
                }
            }
            ActivationState::Active => {
                if self.behavior.consider_deactivation(ctx) {
                    self.state = ActivationState::Inactive;
                    active.remove(self.id);
                    Some(TransitionKind::Deactivated)
                } else {
                    None
                }
            }
        };

        if self.state == ActivationState::Active {
            let proposal = self.behavior.sense_and_act(ctx, &mut self.rng);
            self.apply(proposal);
        }
        transition
    }

    fn apply(&mut self, proposal: Proposal) {
        // `clamp` passes NaN through.
        let m = if proposal.match_degree.is_nan() { 0.0 } else { proposal.match_degree };
        self.match_degree = m.clamp(0.0, 1.0);
        self.weight = self.priority * self.match_degree;
        self.command = proposal.command;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> BehaviorId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.behavior.name()
    }

    /// Priority as validated at registration.
    pub fn priority(&self) -> f64 {
        self.priority
    }

    pub fn state(&self) -> ActivationState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ActivationState::Active
    }

    pub fn match_degree(&self) -> f64 {
        self.match_degree
    }

    /// `priority * match_degree` as of the last `sense_and_act`.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn command(&self) -> MotorCommand {
        self.command
    }

    pub fn halt_request(&self) -> bool {
        self.behavior.halt_request()
    }

    pub fn behavior(&self) -> &dyn Behavior {
        self.behavior.as_ref()
    }
}
