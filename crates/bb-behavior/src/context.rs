//! Read-only controller state passed to every behavior callback.

use bb_core::{SensorId, Tick};
use bb_sensor::{SensorBank, SensorValue};

/// A read-only snapshot handed to each behavior during the update phase.
///
/// Built once per tick after the sensor refresh, so every behavior sees the
/// same readings regardless of registration order.
pub struct BehaviorContext<'a> {
    /// Current controller tick.
    pub tick: Tick,

    /// Every sensor channel, freshly refreshed for this tick.
    pub sensors: &'a SensorBank,
}

impl<'a> BehaviorContext<'a> {
    #[inline]
    pub fn new(tick: Tick, sensors: &'a SensorBank) -> Self {
        Self { tick, sensors }
    }

    #[inline]
    pub fn read(&self, id: SensorId) -> Option<SensorValue> {
        self.sensors.read(id)
    }

    /// Distance reading in centimeters, if `id` is a distance channel.
    pub fn distance(&self, id: SensorId) -> Option<f64> {
        self.read(id).and_then(|v| v.as_distance())
    }

    /// Darkest reflectance sample, if `id` is a reflectance channel.
    pub fn darkest(&self, id: SensorId) -> Option<f64> {
        self.read(id).and_then(|v| v.darkest())
    }

    /// Color-match fraction, if `id` is a camera channel.
    pub fn color_match(&self, id: SensorId) -> Option<f64> {
        self.read(id).and_then(|v| v.as_color_match())
    }
}
