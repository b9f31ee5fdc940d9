//! Action selection over the active behaviors.
//!
//! Both policies take the active behaviors' bids in registration order and
//! run in O(active) time.  The arbitrator holds nothing but its policy flag;
//! the lottery's random stream belongs to the controller.
//!
//! # Degenerate inputs
//!
//! | Input                               | Result                                  |
//! |-------------------------------------|-----------------------------------------|
//! | No active behavior                  | `MotorCommand::STOP`, no halt           |
//! | Lottery with total weight 0         | uniform pick among the active behaviors |

use bb_behavior::Candidate;
use bb_core::{ArbiterRng, BehaviorId, MotorCommand, SelectionPolicy};
use tracing::warn;

/// Why a decision did not come from the regular selection rule.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Fallback {
    /// Nothing was active; the robot stops and keeps running.
    EmptyActiveSet,
    /// Lottery had nothing to weigh; picked uniformly instead.
    ZeroTotalWeight,
}

/// The outcome of one arbitration.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Decision {
    /// The winning behavior, `None` only for [`Fallback::EmptyActiveSet`].
    pub winner:       Option<BehaviorId>,
    pub command:      MotorCommand,
    pub halt_request: bool,
    pub fallback:     Option<Fallback>,
}

impl Decision {
    /// Stop in place and keep running.
    pub fn idle() -> Self {
        Self {
            winner:       None,
            command:      MotorCommand::STOP,
            halt_request: false,
            fallback:     Some(Fallback::EmptyActiveSet),
        }
    }

    fn from_candidate(c: &Candidate) -> Self {
        Self {
            winner:       Some(c.id),
            command:      c.command,
            halt_request: c.halt_request,
            fallback:     None,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Arbitrator {
    policy: SelectionPolicy,
}

impl Arbitrator {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Select one candidate with the configured policy.
    pub fn choose(&self, candidates: &[Candidate], rng: &mut ArbiterRng) -> Decision {
        match self.policy {
            SelectionPolicy::Deterministic => Self::choose_deterministic(candidates),
            SelectionPolicy::Stochastic    => Self::choose_stochastic(candidates, rng),
        }
    }

    /// Greatest weight wins; on equal weight the earlier-registered one does.
    pub fn choose_deterministic(candidates: &[Candidate]) -> Decision {
        let Some(first) = candidates.first() else {
            warn!("no active behavior; stopping");
            return Decision::idle();
        };
        let best = candidates[1..]
            .iter()
            .fold(first, |best, c| if c.weight > best.weight { c } else { best });
        Decision::from_candidate(best)
    }

    /// Weighted lottery.
    ///
    /// Candidates own consecutive half-open intervals `[lo, lo + weight)`
    /// starting at 0.  One draw `r` in `[0, total)` selects the interval
    /// containing it, so zero-weight candidates can never win unless every
    /// weight is zero.
    pub fn choose_stochastic(candidates: &[Candidate], rng: &mut ArbiterRng) -> Decision {
        if candidates.is_empty() {
            warn!("no active behavior; stopping");
            return Decision::idle();
        }

        let total: f64 = candidates.iter().map(|c| c.weight).sum();
        if total.is_infinite() {
            // Weights too large to lay end to end; the heaviest takes it.
            return Self::choose_deterministic(candidates);
        }
        if total <= 0.0 || total.is_nan() {
            warn!(active = candidates.len(), "all active weights are zero; choosing uniformly");
            let pick = &candidates[rng.index(candidates.len())];
            return Decision { fallback: Some(Fallback::ZeroTotalWeight), ..Decision::from_candidate(pick) };
        }

        let r = rng.below(total);
        let mut upper = 0.0;
        for c in candidates {
            upper += c.weight;
            if r < upper {
                return Decision::from_candidate(c);
            }
        }

        // Summation rounding can leave `r` just past the last bound.
        let last = candidates.iter().rfind(|c| c.weight > 0.0).unwrap_or(&candidates[0]);
        Decision::from_candidate(last)
    }
}

