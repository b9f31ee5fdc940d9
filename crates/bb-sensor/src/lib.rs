//! `bb-sensor`: the sensor side of the controller boundary.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`value`]     | `SensorValue`: distance, reflectance array, color match    |
//! | [`sensor`]    | `Sensor` trait (`refresh` / `read` / `reset`)              |
//! | [`bank`]      | `SensorBank`: owns every channel, indexed by `SensorId`    |
//! | [`scripted`]  | `ScriptedSensor`: replays a fixed trace of readings        |
//! | [`error`]     | `SensorError`, `SensorResult<T>`                           |
//!
//! Physical drivers (ultrasonic, IR array, camera) live outside this
//! workspace; they only need to implement [`Sensor`].

pub mod bank;
pub mod error;
pub mod scripted;
pub mod sensor;
pub mod value;


pub use bank::SensorBank;
pub use error::{SensorError, SensorResult};
pub use scripted::{ScriptedSensor, SensorProbe};
pub use sensor::Sensor;
pub use value::SensorValue;
