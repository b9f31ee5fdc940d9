//! `bb-core`: foundational types for the `bbcon` behavior-based controller.
//!
//! This crate is a dependency of every other `bb-*` crate.  It has no `bb-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `BehaviorId`, `SensorId`                                |
//! | [`time`]      | `Tick`, `LoopClock`                                     |
//! | [`config`]    | `ControllerConfig`, `SelectionPolicy`                   |
//! | [`rng`]       | `BehaviorRng` (per-behavior), `ArbiterRng` (controller) |
//! | [`command`]   | `MotorAction`, `MotorCommand`                           |
//! | [`error`]     | `BbError`, `BbResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod command;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use command::{MotorAction, MotorCommand};
pub use config::{ControllerConfig, SelectionPolicy};
pub use error::{BbError, BbResult};
pub use ids::{BehaviorId, SensorId};
pub use rng::{ArbiterRng, BehaviorRng};
pub use time::{LoopClock, Tick};
