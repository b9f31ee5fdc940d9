//! A circular arena with one round obstacle and a colored target patch.
//!
//! The robot is a point with a heading.  Distances are in centimeters and
//! one controller tick moves the robot at most `max_step_cm`.

use std::f64::consts::PI;
use std::sync::{Arc, Mutex};

use bb_motor::{ActuatorError, ActuatorResult, WheelDriver, WheelSpeeds};
use bb_sensor::{Sensor, SensorError, SensorResult, SensorValue};

/// Sonar reading when nothing is in range.
const SONAR_RANGE_CM: f64 = 200.0;
/// Width of the dark border line painted inside the arena wall.
const BORDER_CM: f64 = 6.0;
/// Lateral spacing of the six IR reflectance sensors.
const IR_SPACING_CM: f64 = 1.5;

#[derive(Clone, Debug)]
pub struct Disc {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

#[derive(Clone, Debug)]
pub struct World {
    pub x:            f64,
    pub y:            f64,
    pub heading:      f64,
    pub arena_radius: f64,
    pub obstacle:     Disc,
    pub target:       Disc,
    pub max_step_cm:  f64,
    pub wheelbase_cm: f64,
    pub distance_cm:  f64,
}

impl Default for World {
    fn default() -> Self {
        Self {
            x:            0.0,
            y:            0.0,
            heading:      0.0,
            arena_radius: 100.0,
            obstacle:     Disc { x: 55.0, y: 0.0, r: 12.0 },
            target:       Disc { x: -45.0, y: 40.0, r: 15.0 },
            max_step_cm:  6.0,
            wheelbase_cm: 10.0,
            distance_cm:  0.0,
        }
    }
}

impl World {
    /// Differential-drive kinematics for one tick.
    pub fn drive(&mut self, speeds: WheelSpeeds) {
        let vl = speeds.left * self.max_step_cm;
        let vr = speeds.right * self.max_step_cm;
        let v = (vl + vr) / 2.0;
        self.heading = (self.heading + (vr - vl) / self.wheelbase_cm).rem_euclid(2.0 * PI);

        let (nx, ny) = (self.x + v * self.heading.cos(), self.y + v * self.heading.sin());
        let inside_arena = nx.hypot(ny) < self.arena_radius;
        let inside_obstacle = (nx - self.obstacle.x).hypot(ny - self.obstacle.y) < self.obstacle.r;
        if inside_arena && !inside_obstacle {
            self.x = nx;
            self.y = ny;
            self.distance_cm += v.abs();
        }
    }

    /// Distance along the heading to the obstacle, capped at sonar range.
    pub fn sonar(&self) -> f64 {
        let (c, s) = (self.heading.cos(), self.heading.sin());
        let (dx, dy) = (self.x - self.obstacle.x, self.y - self.obstacle.y);
        let b = dx * c + dy * s;
        let k = dx * dx + dy * dy - self.obstacle.r * self.obstacle.r;
        if k <= 0.0 {
            return 0.0;
        }
        let disc = b * b - k;
        if disc < 0.0 {
            return SONAR_RANGE_CM;
        }
        let t = -b - disc.sqrt();
        if t < 0.0 { SONAR_RANGE_CM } else { t.min(SONAR_RANGE_CM) }
    }

    /// Six reflectance samples across the robot's nose.
    pub fn floor(&self) -> Vec<f64> {
        let (px, py) = (-self.heading.sin(), self.heading.cos());
        (0..6)
            .map(|i| {
                let off = (i as f64 - 2.5) * IR_SPACING_CM;
                let r = (self.x + off * px).hypot(self.y + off * py);
                if r > self.arena_radius - BORDER_CM { 0.05 } else { 0.85 }
            })
            .collect()
    }

    /// Fraction of the camera frame filled by the target color.
    pub fn camera(&self) -> f64 {
        let d = (self.x - self.target.x).hypot(self.y - self.target.y);
        (1.0 - d / (2.0 * self.target.r)).clamp(0.0, 1.0)
    }
}

pub type SharedWorld = Arc<Mutex<World>>;

/// Which reading a [`WorldSensor`] takes.
#[derive(Copy, Clone, Debug)]
pub enum Channel {
    Sonar,
    Floor,
    Camera,
}

/// [`Sensor`] that samples the simulated world.
pub struct WorldSensor {
    name:    &'static str,
    channel: Channel,
    world:   SharedWorld,
    value:   SensorValue,
}

impl WorldSensor {
    pub fn new(name: &'static str, channel: Channel, world: SharedWorld) -> Self {
        let value = match channel {
            Channel::Sonar  => SensorValue::Distance(SONAR_RANGE_CM),
            Channel::Floor  => SensorValue::Reflectance(vec![1.0; 6]),
            Channel::Camera => SensorValue::ColorMatch(0.0),
        };
        Self { name, channel, world, value }
    }
}

impl Sensor for WorldSensor {
    fn name(&self) -> &str {
        self.name
    }

    fn refresh(&mut self) -> SensorResult<()> {
        let world = self.world.lock().map_err(|_| SensorError::Failed {
            name:   self.name.to_owned(),
            reason: "world state poisoned".into(),
        })?;
        self.value = match self.channel {
            Channel::Sonar  => SensorValue::Distance(world.sonar()),
            Channel::Floor  => SensorValue::Reflectance(world.floor()),
            Channel::Camera => SensorValue::ColorMatch(world.camera()),
        };
        Ok(())
    }

    fn read(&self) -> SensorValue {
        self.value.clone()
    }
}

/// [`WheelDriver`] that moves the simulated robot.
pub struct WorldDrive {
    world: SharedWorld,
}

impl WorldDrive {
    pub fn new(world: SharedWorld) -> Self {
        Self { world }
    }
}

impl WheelDriver for WorldDrive {
    fn set_speeds(&mut self, speeds: WheelSpeeds) -> ActuatorResult<()> {
        let mut world = self
            .world
            .lock()
            .map_err(|_| ActuatorError::Failed("world state poisoned".into()))?;
        world.drive(speeds);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sonar_sees_obstacle_ahead() {
        let w = World::default();
        assert!((w.sonar() - 43.0).abs() < 1e-9);
        let facing_away = World { heading: PI, ..World::default() };
        assert_eq!(facing_away.sonar(), SONAR_RANGE_CM);
    }

    #[test]
    fn floor_dark_only_at_border() {
        let w = World::default();
        assert!(w.floor().iter().all(|&v| v > 0.5));
        let edge = World { x: 97.0, ..World::default() };
        assert!(edge.floor().iter().any(|&v| v < 0.3));
    }

    #[test]
    fn forward_drive_moves_along_heading() {
        let mut w = World::default();
        w.drive(WheelSpeeds { left: 1.0, right: 1.0 });
        assert!((w.x - 6.0).abs() < 1e-9);
        assert_eq!(w.y, 0.0);
    }

    #[test]
    fn obstacle_blocks_motion() {
        let mut w = World { x: 42.0, ..World::default() };
        w.drive(WheelSpeeds { left: 1.0, right: 1.0 });
        assert_eq!(w.x, 42.0);
    }

    #[test]
    fn camera_full_on_target() {
        let w = World { x: -45.0, y: 40.0, ..World::default() };
        assert_eq!(w.camera(), 1.0);
        assert_eq!(World::default().camera(), 0.0);
    }
}
