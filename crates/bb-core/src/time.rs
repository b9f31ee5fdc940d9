//! Controller time model.
//!
//! The controller advances in discrete timesteps.  `Tick` counts completed
//! cycles; `LoopClock` pairs it with the fixed loop period so elapsed robot
//! time can be reported without reading a wall clock.

use std::fmt;
use std::time::Duration;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A controller timestep counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── LoopClock ─────────────────────────────────────────────────────────────────

/// Tracks the current tick and the nominal loop period.
#[derive(Clone, Debug)]
pub struct LoopClock {
    /// Nominal duration of one controller cycle.
    pub period: Duration,
    /// The current tick: advanced by `LoopClock::advance()` after each cycle.
    pub current_tick: Tick,
}

impl LoopClock {
    pub fn new(period: Duration) -> Self {
        Self { period, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    /// Nominal robot time elapsed since tick 0.
    pub fn elapsed(&self) -> Duration {
        self.period.saturating_mul(self.current_tick.0.min(u32::MAX as u64) as u32)
    }
}

impl fmt::Display for LoopClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}s)", self.current_tick, self.elapsed().as_secs_f64())
    }
}
