//! A sensor that replays a fixed trace: stands in for hardware in tests and
//! in the simulated demo.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{Sensor, SensorError, SensorResult, SensorValue};

/// Call counters shared between a [`ScriptedSensor`] and its test harness.
///
/// The sensor itself moves into the `SensorBank`; keep a probe to observe it.
#[derive(Clone, Default, Debug)]
pub struct SensorProbe {
    refreshes: Arc<AtomicUsize>,
    resets:    Arc<AtomicUsize>,
}

impl SensorProbe {
    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::Relaxed)
    }

    pub fn resets(&self) -> usize {
        self.resets.load(Ordering::Relaxed)
    }
}

/// Replays `trace` one reading per `refresh`, holding the last reading once
/// the trace is exhausted.
pub struct ScriptedSensor {
    name:       String,
    trace:      Vec<SensorValue>,
    cursor:     usize,
    current:    SensorValue,
    fail_after: Option<usize>,
    probe:      SensorProbe,
}

impl ScriptedSensor {
    /// # Panics
    /// Panics if `trace` is empty.
    pub fn new(name: impl Into<String>, trace: Vec<SensorValue>) -> Self {
        assert!(!trace.is_empty(), "scripted sensor needs at least one reading");
        let current = trace[0].clone();
        Self {
            name: name.into(),
            trace,
            cursor: 0,
            current,
            fail_after: None,
            probe: SensorProbe::default(),
        }
    }

    /// A channel that reports `value` forever.
    pub fn constant(name: impl Into<String>, value: SensorValue) -> Self {
        Self::new(name, vec![value])
    }

    /// Make every refresh after the first `n` fail permanently.
    pub fn failing_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    pub fn probe(&self) -> SensorProbe {
        self.probe.clone()
    }
}

impl Sensor for ScriptedSensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn refresh(&mut self) -> SensorResult<()> {
        let done = self.probe.refreshes.fetch_add(1, Ordering::Relaxed);
        if self.fail_after.is_some_and(|n| done >= n) {
            return Err(SensorError::Failed {
                name:   self.name.clone(),
                reason: "scripted failure".into(),
            });
        }
        let last = self.trace.len() - 1;
        self.current = self.trace[self.cursor.min(last)].clone();
        self.cursor += 1;
        Ok(())
    }

    fn read(&self) -> SensorValue {
        self.current.clone()
    }

    fn reset(&mut self) -> SensorResult<()> {
        self.probe.resets.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
