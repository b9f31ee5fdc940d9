//! `bb-control`: the behavior-based controller loop.
//!
//! # One controller tick
//!
//! ```text
//! ① Refresh  : every sensor referenced by a behavior, once each.
//! ② Update   : each behavior in registration order: one activation check,
//!               then sense_and_act if it ends the tick active.
//! ③ Arbitrate: pick one active behavior's command (deterministic or
//!               weighted lottery).
//! ④ Actuate  : forward the command to the actuator.
//! ⑤ Halt     : record the winner's halt request.
//! ⑥ Reset    : reset every referenced sensor.
//! ⑦ Pace     : wait out the rest of the loop period (skipped once halted).
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bb_behavior::{AvoidObstacle, Thresholds, Wander};
//! use bb_control::{BbconBuilder, NoopObserver};
//! use bb_core::ControllerConfig;
//! use bb_motor::RecordingActuator;
//! use bb_sensor::{ScriptedSensor, SensorBank, SensorValue};
//!
//! let mut bank = SensorBank::new();
//! let sonar = bank.add(ScriptedSensor::constant("sonar", SensorValue::Distance(50.0)))?;
//! let th = Thresholds::default();
//!
//! let mut bbcon = BbconBuilder::new(ControllerConfig::default(), RecordingActuator::new())
//!     .sensors(bank)
//!     .behavior(Wander::new(0.5))
//!     .behavior(AvoidObstacle::new(sonar, &th, 2.0))
//!     .build()?;
//! bbcon.run(&mut NoopObserver)?;
//! ```

pub mod arbitrator;
pub mod bbcon;
pub mod builder;
pub mod error;
pub mod observer;
pub mod pacer;

#[cfg(test)]
mod tests;

pub use arbitrator::{Arbitrator, Decision, Fallback};
pub use bbcon::{Bbcon, RunSummary, StopReason};
pub use builder::BbconBuilder;
pub use error::{ControlError, ControlResult};
pub use observer::{ControllerObserver, NoopObserver};
pub use pacer::{NoPacer, Pacer, SleepPacer};
