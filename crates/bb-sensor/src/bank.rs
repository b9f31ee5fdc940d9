//! `SensorBank`: single owner of every sensor channel.
//!
//! Behaviors never hold a sensor; they hold a [`SensorId`] and read through
//! the bank.  A channel shared by several behaviors is therefore refreshed
//! and reset once per tick no matter how many behaviors consume it.

use bb_core::SensorId;
use tracing::trace;

use crate::{Sensor, SensorError, SensorResult, SensorValue};

#[derive(Default)]
pub struct SensorBank {
    sensors: Vec<Box<dyn Sensor>>,
}

impl SensorBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `sensor` and return its channel ID.
    pub fn add<S: Sensor>(&mut self, sensor: S) -> SensorResult<SensorId> {
        let id = SensorId::try_from(self.sensors.len())
            .map_err(|_| SensorError::BankFull { max: u16::MAX as usize + 1 })?;
        self.sensors.push(Box::new(sensor));
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    pub fn contains(&self, id: SensorId) -> bool {
        id.index() < self.sensors.len()
    }

    pub fn name(&self, id: SensorId) -> Option<&str> {
        self.sensors.get(id.index()).map(|s| s.name())
    }

    /// Latest reading of channel `id`, or `None` if it is not registered.
    pub fn read(&self, id: SensorId) -> Option<SensorValue> {
        self.sensors.get(id.index()).map(|s| s.read())
    }

    /// Refresh each listed channel once, in the order given.
    ///
    /// Stops at the first failure; callers pass a deduplicated list.
    pub fn refresh(&mut self, ids: &[SensorId]) -> SensorResult<()> {
        for &id in ids {
            let sensor = self.sensors.get_mut(id.index()).ok_or(SensorError::Unknown(id))?;
            sensor.refresh()?;
            trace!(sensor = sensor.name(), value = ?sensor.read(), "refreshed");
        }
        Ok(())
    }

    /// Reset each listed channel once, in the order given.
    pub fn reset(&mut self, ids: &[SensorId]) -> SensorResult<()> {
        for &id in ids {
            self.sensors
                .get_mut(id.index())
                .ok_or(SensorError::Unknown(id))?
                .reset()?;
        }
        Ok(())
    }
}
