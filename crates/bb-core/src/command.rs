//! Motor commands: the single output of every controller cycle.

use std::fmt;

/// Discrete drive action understood by the actuator.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MotorAction {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    Stop,
}

impl MotorAction {
    /// Single-letter token used in logs and recorded traces.
    pub fn token(self) -> char {
        match self {
            MotorAction::Forward   => 'F',
            MotorAction::Backward  => 'B',
            MotorAction::TurnLeft  => 'L',
            MotorAction::TurnRight => 'R',
            MotorAction::Stop      => 'S',
        }
    }

    /// Inverse of [`token`](Self::token).
    pub fn from_token(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'F' => Some(MotorAction::Forward),
            'B' => Some(MotorAction::Backward),
            'L' => Some(MotorAction::TurnLeft),
            'R' => Some(MotorAction::TurnRight),
            'S' => Some(MotorAction::Stop),
            _   => None,
        }
    }
}

/// A motor directive: an action plus an optional speed in `[0, 1]`.
///
/// `speed: None` means "actuator default".  A stop never carries a speed.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotorCommand {
    pub action: MotorAction,
    pub speed:  Option<f64>,
}

impl MotorCommand {
    pub const STOP: MotorCommand = MotorCommand { action: MotorAction::Stop, speed: None };

    /// Build a command; the speed is clamped to `[0, 1]` and dropped for stops.
    pub fn new(action: MotorAction, speed: Option<f64>) -> Self {
        let speed = match action {
            MotorAction::Stop => None,
            _ => speed.map(|s| if s.is_finite() { s.clamp(0.0, 1.0) } else { 0.0 }),
        };
        Self { action, speed }
    }

    pub fn forward(speed: f64) -> Self {
        Self::new(MotorAction::Forward, Some(speed))
    }

    pub fn backward(speed: f64) -> Self {
        Self::new(MotorAction::Backward, Some(speed))
    }

    pub fn left(speed: f64) -> Self {
        Self::new(MotorAction::TurnLeft, Some(speed))
    }

    pub fn right(speed: f64) -> Self {
        Self::new(MotorAction::TurnRight, Some(speed))
    }

    #[inline]
    pub fn is_stop(&self) -> bool {
        self.action == MotorAction::Stop
    }
}

impl Default for MotorCommand {
    fn default() -> Self {
        Self::STOP
    }
}

impl fmt::Display for MotorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.speed {
            Some(s) => write!(f, "{} {:.2}", self.action.token(), s),
            None    => write!(f, "{}", self.action.token()),
        }
    }
}
