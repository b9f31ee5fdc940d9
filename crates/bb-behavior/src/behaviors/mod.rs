//! Stock behaviors for a small differential-drive robot with an ultrasonic
//! range finder, a downward IR reflectance array, and a color camera.
//!
//! | Behavior          | Sensor      | Starts   | Proposes                     | Halts |
//! |-------------------|-------------|----------|------------------------------|-------|
//! | [`Wander`]        | -           | active   | forward, occasional turn     | no    |
//! | [`AvoidObstacle`] | distance    | inactive | turn left / back off         | no    |
//! | [`KeepInArea`]    | reflectance | inactive | reverse away from the border | no    |
//! | [`CollisionStop`] | distance    | inactive | stop                         | yes   |
//! | [`FoundTarget`]   | color match | inactive | stop                         | yes   |
//!
//! Every reactive behavior deactivates on exactly the negation of its
//! activation predicate, so a steady reading never makes it flicker.

mod area;
mod avoid;
mod halt;
mod wander;

pub use area::KeepInArea;
pub use avoid::AvoidObstacle;
pub use halt::{CollisionStop, FoundTarget};
pub use wander::Wander;

/// How far `value` sits below `cutoff`, normalized to `[0, 1]`.
///
/// 0 at or above the cutoff, 1 at zero.
pub(crate) fn shortfall(value: f64, cutoff: f64) -> f64 {
    if value.is_nan() || value >= cutoff {
        return 0.0;
    }
    ((cutoff - value) / cutoff.max(f64::EPSILON)).clamp(0.0, 1.0)
}
