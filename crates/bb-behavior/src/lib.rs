//! `bb-behavior`: behaviors and their activation lifecycle.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`model`]      | `Behavior` trait, `Proposal`                                   |
//! | [`context`]    | `BehaviorContext<'a>`: read-only tick snapshot for behaviors   |
//! | [`slot`]       | `BehaviorSlot`: per-behavior state machine and derived weight  |
//! | [`active`]     | `ActiveSet`: registration-ordered set of active behaviors      |
//! | [`registry`]   | `Registry`, `Candidate`, `Transition`                          |
//! | [`behaviors`]  | `Wander`, `AvoidObstacle`, `KeepInArea`, `CollisionStop`, `FoundTarget` |
//! | [`thresholds`] | `Thresholds`: tunable trigger cutoffs                          |
//! | [`error`]      | `BehaviorError`, `BehaviorResult<T>`                           |
//!
//! # Lifecycle
//!
//! Once per tick, in registration order, each slot runs exactly one of
//! `consider_activation` (if it entered the tick inactive) or
//! `consider_deactivation` (if it entered active).  Only a slot that ends the
//! tick active calls `sense_and_act` and refreshes its weight and command.
//!
//! Active-set membership is toggled only from inside that step, on the slot's
//! own ID.  `ActiveSet` exposes no public mutators, so nothing outside this
//! crate can add or remove a behavior.

pub mod active;
pub mod behaviors;
pub mod context;
pub mod error;
pub mod model;
pub mod registry;
pub mod slot;
pub mod thresholds;


pub use active::ActiveSet;
pub use behaviors::{AvoidObstacle, CollisionStop, FoundTarget, KeepInArea, Wander};
pub use context::BehaviorContext;
pub use error::{BehaviorError, BehaviorResult};
pub use model::{Behavior, Proposal};
pub use registry::{Candidate, Registry, Transition, TransitionKind};
pub use slot::{ActivationState, BehaviorSlot};
pub use thresholds::Thresholds;
