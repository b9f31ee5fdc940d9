//! Loop pacing between ticks.

use std::time::{Duration, Instant};

/// Holds the loop to its fixed period.
///
/// Called once at the end of every non-final tick.  There is no way to
/// interrupt a wait other than ending the process.
pub trait Pacer {
    fn pace(&mut self, period: Duration);
}

/// Returns immediately.  For tests and faster-than-real-time simulation.
#[derive(Default, Debug, Clone, Copy)]
pub struct NoPacer;

impl Pacer for NoPacer {
    fn pace(&mut self, _period: Duration) {}
}

/// Sleeps for whatever is left of `period` since the previous call, so slow
/// ticks are not stretched further.  The first call sleeps the full period.
#[derive(Default, Debug)]
pub struct SleepPacer {
    last: Option<Instant>,
}

impl SleepPacer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Pacer for SleepPacer {
    fn pace(&mut self, period: Duration) {
        let wait = match self.last {
            Some(prev) => period.saturating_sub(prev.elapsed()),
            None => period,
        };
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        self.last = Some(Instant::now());
    }
}
