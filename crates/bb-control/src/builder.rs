//! Fluent builder for constructing a [`Bbcon`].

use bb_behavior::{Behavior, Registry};
use bb_core::{ArbiterRng, ControllerConfig, LoopClock};
use bb_motor::Actuator;
use bb_sensor::SensorBank;
use tracing::info;

use crate::{Arbitrator, Bbcon, ControlError, ControlResult, NoPacer, Pacer};

/// Fluent builder for [`Bbcon<A, P>`].
///
/// # Required inputs
///
/// - [`ControllerConfig`]: seed, policy, period, tick limit
/// - `A: Actuator`: where commands go
/// - at least one behavior
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default               |
/// |-----------------|-----------------------|
/// | `.sensors(b)`   | empty `SensorBank`    |
/// | `.pacer(p)`     | `NoPacer`             |
///
/// Behaviors are registered in call order; that order is the update order
/// and the arbitration tie-break order for the controller's lifetime.
pub struct BbconBuilder<A: Actuator, P: Pacer = NoPacer> {
    config:    ControllerConfig,
    actuator:  A,
    pacer:     P,
    sensors:   Option<SensorBank>,
    behaviors: Vec<Box<dyn Behavior>>,
}

impl<A: Actuator> BbconBuilder<A, NoPacer> {
    pub fn new(config: ControllerConfig, actuator: A) -> Self {
        Self {
            config,
            actuator,
            pacer: NoPacer,
            sensors: None,
            behaviors: Vec::new(),
        }
    }
}

impl<A: Actuator, P: Pacer> BbconBuilder<A, P> {
    /// Hand over every sensor channel the behaviors refer to.
    pub fn sensors(mut self, bank: SensorBank) -> Self {
        self.sensors = Some(bank);
        self
    }

    /// Append a behavior to the registry.
    pub fn behavior<B: Behavior>(mut self, behavior: B) -> Self {
        self.behaviors.push(Box::new(behavior));
        self
    }

    pub fn boxed_behavior(mut self, behavior: Box<dyn Behavior>) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Replace the loop pacer.
    pub fn pacer<Q: Pacer>(self, pacer: Q) -> BbconBuilder<A, Q> {
        BbconBuilder {
            config:    self.config,
            actuator:  self.actuator,
            pacer,
            sensors:   self.sensors,
            behaviors: self.behaviors,
        }
    }

    /// Validate inputs, register behaviors, and return a ready-to-run
    /// [`Bbcon`].
    pub fn build(self) -> ControlResult<Bbcon<A, P>> {
        self.config.validate()?;
        if self.behaviors.is_empty() {
            return Err(ControlError::NoBehaviors);
        }

        let sensors = self.sensors.unwrap_or_default();
        let mut registry = Registry::new(self.config.seed);
        for behavior in self.behaviors {
            if let Some(&missing) = behavior.sensors().iter().find(|&&id| !sensors.contains(id)) {
                return Err(ControlError::UnknownSensor {
                    behavior: behavior.name().to_owned(),
                    sensor:   missing,
                });
            }
            registry.register_boxed(behavior)?;
        }
        let sensor_ids = registry.referenced_sensors();

        info!(
            behaviors = registry.len(),
            sensors = sensor_ids.len(),
            policy = ?self.config.policy,
            "controller built"
        );

        Ok(Bbcon {
            clock:      LoopClock::new(self.config.period()),
            arbitrator: Arbitrator::new(self.config.policy),
            rng:        ArbiterRng::new(self.config.seed),
            config:     self.config,
            sensors,
            sensor_ids,
            registry,
            actuator:   self.actuator,
            pacer:      self.pacer,
            halted:     false,
            halted_by:  None,
            last:       None,
        })
    }
}
