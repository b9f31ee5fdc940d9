//! Deterministic per-behavior and arbitration RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each behavior gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (behavior_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive behavior IDs uniformly across the seed space.
//! Registering an extra behavior at the end of the registry therefore does
//! not change the random stream any existing behavior sees.
//!
//! The stochastic arbitration lottery draws from a separate `ArbiterRng` so
//! behavior randomness and selection randomness never interleave.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::BehaviorId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Offset mixed into the arbiter seed so it never coincides with a behavior's.
const ARBITER_STREAM: u64 = 0xa5a5_a5a5_a5a5_a5a5;

// ── BehaviorRng ───────────────────────────────────────────────────────────────

/// Per-behavior deterministic RNG.
pub struct BehaviorRng(SmallRng);

impl BehaviorRng {
    /// Seed deterministically from the run's global seed and a behavior ID.
    pub fn new(global_seed: u64, behavior: BehaviorId) -> Self {
        let seed = global_seed ^ (behavior.0 as u64 + 1).wrapping_mul(MIXING_CONSTANT);
        BehaviorRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]; NaN counts as 0).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        self.0.gen_bool(p)
    }
}

// ── ArbiterRng ────────────────────────────────────────────────────────────────

/// RNG consumed by the stochastic arbitration policy, one draw per tick.
///
/// Owned by the controller, not the arbitrator, so the arbitrator itself
/// stays stateless apart from its policy flag.
pub struct ArbiterRng(SmallRng);

impl ArbiterRng {
    pub fn new(seed: u64) -> Self {
        ArbiterRng(SmallRng::seed_from_u64(seed ^ ARBITER_STREAM))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform draw in the half-open interval `[0, upper)`.
    ///
    /// `upper` must be finite and strictly positive.
    #[inline]
    pub fn below(&mut self, upper: f64) -> f64 {
        self.0.gen_range(0.0..upper)
    }

    /// Uniform index in `0..len`.  `len` must be non-zero.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}
