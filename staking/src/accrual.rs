//! Reward accrual policies.
//!
//! Accrual is a pure function of a position's own principal, the campaign
//! rate, and elapsed seconds — no pool-wide pro-rata split. The pool
//! guarantees a rate rather than dividing a fixed budget, so one staker's
//! reward never depends on another staker joining or leaving.

/// Default fixed-point denominator for [`FixedRate`].
///
/// A rate of `REWARD_SCALE` pays 1 raw unit per staked raw unit per second.
pub const REWARD_SCALE: u128 = 1_000_000_000_000;

/// Computes the reward a position earns over an elapsed interval.
///
/// Implementations must be pure and deterministic. `None` signals
/// arithmetic overflow, which the caller surfaces as an error — rewards
/// are never silently wrapped or saturated.
pub trait RewardPolicy {
    fn accrued(&self, principal: u128, elapsed_secs: u64) -> Option<u128>;
}

/// Fixed reward rate per staked unit per second.
///
/// `accrued = floor(principal × rate × elapsed / scale)`. Truncation is
/// deliberate: rounding must never over-credit a staker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FixedRate {
    /// Reward per staked raw unit per second, scaled by `scale`.
    pub rate: u128,
    /// Fixed-point denominator.
    pub scale: u128,
}

impl FixedRate {
    /// A rate against the default [`REWARD_SCALE`].
    pub fn new(rate: u128) -> Self {
        Self {
            rate,
            scale: REWARD_SCALE,
        }
    }

    pub fn with_scale(rate: u128, scale: u128) -> Self {
        Self { rate, scale }
    }
}

impl RewardPolicy for FixedRate {
    fn accrued(&self, principal: u128, elapsed_secs: u64) -> Option<u128> {
        if self.scale == 0 {
            return None;
        }
        principal
            .checked_mul(self.rate)?
            .checked_mul(elapsed_secs as u128)
            .map(|raw| raw / self.scale)
    }
}
