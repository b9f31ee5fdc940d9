//! Motor unit: translates discrete commands into differential wheel speeds.
//!
//! | Action      | (left, right) |
//! |-------------|---------------|
//! | `Forward`   | ( s,  s)      |
//! | `Backward`  | (-s, -s)      |
//! | `TurnLeft`  | ( 0,  s)      |
//! | `TurnRight` | ( s,  0)      |
//! | `Stop`      | ( 0,  0)      |
//!
//! `s` is the command's speed, or the unit's default speed when absent.

use bb_core::{MotorAction, MotorCommand};
use tracing::debug;

use crate::{Actuator, ActuatorResult};

/// Signed wheel speeds in `[-1, 1]`.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct WheelSpeeds {
    pub left:  f64,
    pub right: f64,
}

impl WheelSpeeds {
    pub const STOPPED: WheelSpeeds = WheelSpeeds { left: 0.0, right: 0.0 };

    pub fn for_command(command: MotorCommand, default_speed: f64) -> Self {
        let s = command.speed.unwrap_or(default_speed).clamp(0.0, 1.0);
        let (left, right) = match command.action {
            MotorAction::Forward   => (s, s),
            MotorAction::Backward  => (-s, -s),
            MotorAction::TurnLeft  => (0.0, s),
            MotorAction::TurnRight => (s, 0.0),
            MotorAction::Stop      => (0.0, 0.0),
        };
        Self { left, right }
    }
}

/// Low-level motor driver: sets both wheel speeds at once.
pub trait WheelDriver: Send + 'static {
    fn set_speeds(&mut self, speeds: WheelSpeeds) -> ActuatorResult<()>;
}

/// [`Actuator`] over a differential [`WheelDriver`].
pub struct Motob<W: WheelDriver> {
    driver:        W,
    default_speed: f64,
    last:          Option<MotorCommand>,
}

impl<W: WheelDriver> Motob<W> {
    pub fn new(driver: W, default_speed: f64) -> Self {
        Self { driver, default_speed, last: None }
    }

    /// The most recently applied command.
    pub fn last_command(&self) -> Option<MotorCommand> {
        self.last
    }

    pub fn driver(&self) -> &W {
        &self.driver
    }
}

impl<W: WheelDriver> Actuator for Motob<W> {
    fn apply(&mut self, command: MotorCommand) -> ActuatorResult<()> {
        let speeds = WheelSpeeds::for_command(command, self.default_speed);
        debug!(%command, left = speeds.left, right = speeds.right, "motor command");
        self.driver.set_speeds(speeds)?;
        self.last = Some(command);
        Ok(())
    }
}
