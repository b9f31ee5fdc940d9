//! `bb-motor`: the actuator side of the controller boundary.
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`actuator`]   | `Actuator` trait, `RecordingActuator`                      |
//! | [`motob`]      | `Motob`: command → wheel speeds over a `WheelDriver`       |
//! | [`error`]      | `ActuatorError`, `ActuatorResult<T>`                       |

pub mod actuator;
pub mod error;
pub mod motob;


pub use actuator::{Actuator, RecordingActuator};
pub use error::{ActuatorError, ActuatorResult};
pub use motob::{Motob, WheelDriver, WheelSpeeds};
