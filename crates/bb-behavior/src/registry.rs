//! `Registry`: every behavior the robot has, plus the active subset.

use bb_core::{BehaviorId, MotorCommand, SensorId, Tick};
use tracing::{debug, warn};

use crate::{ActiveSet, Behavior, BehaviorContext, BehaviorError, BehaviorResult, BehaviorSlot};

/// Direction of an activation change.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TransitionKind {
    Activated,
    Deactivated,
}

/// An activation change recorded during the update phase.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Transition {
    pub tick:     Tick,
    pub behavior: BehaviorId,
    pub kind:     TransitionKind,
}

/// An active behavior's bid, as seen by the arbitrator.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Candidate {
    pub id:           BehaviorId,
    pub weight:       f64,
    pub command:      MotorCommand,
    pub halt_request: bool,
}

/// Registration-ordered behavior storage.
///
/// Registration order is fixed for the registry's lifetime and doubles as
/// the update order and the arbitration tie-break order.
pub struct Registry {
    slots:  Vec<BehaviorSlot>,
    active: ActiveSet,
    seed:   u64,
}

impl Registry {
    /// `seed` seeds each behavior's private RNG.
    pub fn new(seed: u64) -> Self {
        Self { slots: Vec::new(), active: ActiveSet::default(), seed }
    }

    /// Register `behavior` and return its ID.
    ///
    /// Registering a second behavior with the same name is a no-op that
    /// returns the existing ID.
    pub fn register<B: Behavior>(&mut self, behavior: B) -> BehaviorResult<BehaviorId> {
        self.register_boxed(Box::new(behavior))
    }

    pub fn register_boxed(&mut self, behavior: Box<dyn Behavior>) -> BehaviorResult<BehaviorId> {
        if let Some(existing) = self.find(behavior.name()) {
            warn!(name = behavior.name(), id = %existing, "duplicate behavior registration ignored");
            return Ok(existing);
        }

        let priority = behavior.priority();
        if !priority.is_finite() || priority < 0.0 {
            return Err(BehaviorError::InvalidPriority { name: behavior.name().to_owned(), priority });
        }

        let id = BehaviorId::try_from(self.slots.len())
            .map_err(|_| BehaviorError::RegistryFull { max: u16::MAX as usize })?;
        let mut slot = BehaviorSlot::new(id, behavior, priority, self.seed);
        slot.enter_initial_state(&mut self.active);
        debug!(name = slot.name(), %id, priority, active = slot.is_active(), "behavior registered");
        self.slots.push(slot);
        Ok(id)
    }

    /// Look up a behavior by name.
    pub fn find(&self, name: &str) -> Option<BehaviorId> {
        self.slots.iter().find(|s| s.name() == name).map(|s| s.id())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, id: BehaviorId) -> Option<&BehaviorSlot> {
        self.slots.get(id.index())
    }

    pub fn slots(&self) -> &[BehaviorSlot] {
        &self.slots
    }

    pub fn active(&self) -> &ActiveSet {
        &self.active
    }

    /// Sensor channels referenced by any behavior, deduplicated, in order of
    /// first reference.
    pub fn referenced_sensors(&self) -> Vec<SensorId> {
        let mut ids: Vec<SensorId> = Vec::new();
        for slot in &self.slots {
            for &sensor in slot.behavior().sensors() {
                if !ids.contains(&sensor) {
                    ids.push(sensor);
                }
            }
        }
        ids
    }

    /// Run every slot's state machine once, in registration order.
    pub fn update_all(&mut self, ctx: &BehaviorContext<'_>) -> Vec<Transition> {
        let active = &mut self.active;
        let mut transitions = Vec::new();
        for slot in self.slots.iter_mut() {
            if let Some(kind) = slot.update(ctx, active) {
                debug!(tick = %ctx.tick, name = slot.name(), ?kind, "activation changed");
                transitions.push(Transition { tick: ctx.tick, behavior: slot.id(), kind });
            }
        }
        transitions
    }

    /// Bids of all active behaviors, in registration order.
    pub fn candidates(&self) -> Vec<Candidate> {
        self.active
            .iter()
            .map(|id| {
                let slot = &self.slots[id.index()];
                Candidate {
                    id,
                    weight:       slot.weight(),
                    command:      slot.command(),
                    halt_request: slot.halt_request(),
                }
            })
            .collect()
    }
}
