//! Pool and per-user staking state.

use crate::accrual::RewardPolicy;
use crate::error::StakingError;
use harvest_types::{AccountId, Amount, CampaignId, Timestamp};
use serde::{Deserialize, Serialize};

/// Shared state of one staking campaign.
///
/// Created exactly once by `initialize`, never deleted. `admin` and
/// `reward_rate` are immutable after creation; the counters move with
/// every stake/claim/unstake.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolState {
    pub campaign: CampaignId,
    /// Identity allowed to fund the reward reserve.
    pub admin: AccountId,
    /// Reward per staked raw unit per second (against the policy scale).
    pub reward_rate: u128,
    /// Sum of all active positions' principal. Mirrors the stake vault.
    pub total_staked: Amount,
    /// Tokens earmarked for payouts. Mirrors the reward vault.
    pub reward_reserve: Amount,
    pub created_at: Timestamp,
}

/// One user's stake record: principal, accrual checkpoint, and reward
/// computed but not yet paid out.
///
/// Never physically deleted — a position with zero principal and zero
/// unpaid reward is logically closed and may be garbage-collected by the
/// surrounding storage layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserPosition {
    pub owner: AccountId,
    /// Currently staked amount.
    pub principal: Amount,
    /// Last time accrual was settled for this position.
    pub checkpoint: Timestamp,
    /// Reward accrued up to `checkpoint` but not yet transferred.
    pub accrued_unpaid: Amount,
}

impl UserPosition {
    pub fn new(owner: AccountId, now: Timestamp) -> Self {
        Self {
            owner,
            principal: Amount::ZERO,
            checkpoint: now,
            accrued_unpaid: Amount::ZERO,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.principal.is_zero() && self.accrued_unpaid.is_zero()
    }

    /// Fold reward earned since `checkpoint` into `accrued_unpaid` and
    /// advance the checkpoint to `now`.
    ///
    /// Must run before any principal change so elapsed time is always
    /// measured against a constant principal. Rejects a regressed clock —
    /// the state is left untouched on error.
    pub fn settle(
        &mut self,
        policy: &dyn RewardPolicy,
        now: Timestamp,
    ) -> Result<(), StakingError> {
        if now < self.checkpoint {
            return Err(StakingError::ClockRegression {
                checkpoint: self.checkpoint,
                now,
            });
        }
        let elapsed = self.checkpoint.elapsed_since(now);
        let owed = policy
            .accrued(self.principal.raw(), elapsed)
            .ok_or(StakingError::Overflow)?;
        self.accrued_unpaid = self
            .accrued_unpaid
            .checked_add(Amount::new(owed))
            .ok_or(StakingError::Overflow)?;
        self.checkpoint = now;
        Ok(())
    }
}
