//! The `Actuator` trait and a recording implementation.

use std::sync::{Arc, Mutex};

use bb_core::MotorCommand;

use crate::{ActuatorError, ActuatorResult};

/// Anything that can carry out a [`MotorCommand`].
///
/// Called exactly once per controller tick with the arbitration winner's
/// command.  Commands are never retried; an `Err` stops the run.
pub trait Actuator: Send + 'static {
    fn apply(&mut self, command: MotorCommand) -> ActuatorResult<()>;
}

impl<A: Actuator + ?Sized> Actuator for Box<A> {
    fn apply(&mut self, command: MotorCommand) -> ActuatorResult<()> {
        (**self).apply(command)
    }
}

/// An [`Actuator`] that only remembers what it was told.
///
/// Clones share the same log, so a test can keep one clone and hand the
/// other to the controller.
#[derive(Clone, Default)]
pub struct RecordingActuator {
    pub(crate) log: Arc<Mutex<Vec<MotorCommand>>>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command applied so far, oldest first.
    pub fn commands(&self) -> Vec<MotorCommand> {
        self.log.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<MotorCommand> {
        self.log.lock().ok().and_then(|l| l.last().copied())
    }
}

impl Actuator for RecordingActuator {
    fn apply(&mut self, command: MotorCommand) -> ActuatorResult<()> {
        let mut log = self
            .log
            .lock()
            .map_err(|_| ActuatorError::Failed("command log poisoned".into()))?;
        log.push(command);
        Ok(())
    }
}
