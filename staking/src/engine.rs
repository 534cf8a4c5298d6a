//! The staking operations controller.

use crate::accrual::FixedRate;
use crate::config::{CampaignConfig, ReservePolicy};
use crate::error::StakingError;
use crate::state::{PoolState, UserPosition};
use harvest_ledger::BalanceLedger;
use harvest_types::{AccountId, Amount, CampaignId, Timestamp};
use std::collections::HashMap;

/// Sanity ceiling for the reward rate. A rate above this has no sensible
/// economic meaning and only risks overflow headroom.
pub const MAX_REWARD_RATE: u128 = 1_000_000_000_000_000_000_000_000;

/// The staking engine — one campaign's pool, its positions, and the four
/// lifecycle operations plus reserve funding.
///
/// The engine is a sequential state machine: every operation runs to
/// completion under `&mut self`, checks all preconditions before any
/// mutation, and on error leaves engine state and ledger balances exactly
/// as they were. Callers wanting multi-user concurrency serialize access
/// to the engine; positions for different users never alias.
pub struct StakingEngine {
    campaign: CampaignId,
    policy: FixedRate,
    reserve_policy: ReservePolicy,
    pub(crate) pool: Option<PoolState>,
    pub(crate) positions: HashMap<AccountId, UserPosition>,
}

impl StakingEngine {
    pub fn new(campaign: CampaignId, policy: FixedRate, reserve_policy: ReservePolicy) -> Self {
        Self {
            campaign,
            policy,
            reserve_policy,
            pool: None,
            positions: HashMap::new(),
        }
    }

    /// Build an engine from a campaign configuration.
    ///
    /// The configured `initial_reserve` is not applied here — it is the
    /// amount the admin passes to [`StakingEngine::initialize`].
    pub fn from_config(config: &CampaignConfig) -> Self {
        Self::new(
            CampaignId::new(config.campaign.clone()),
            config.fixed_rate(),
            config.reserve_policy,
        )
    }

    pub fn campaign(&self) -> &CampaignId {
        &self.campaign
    }

    /// The pool, if `initialize` has run.
    pub fn pool(&self) -> Option<&PoolState> {
        self.pool.as_ref()
    }

    /// A user's position, if they ever staked.
    pub fn position(&self, owner: &AccountId) -> Option<&UserPosition> {
        self.positions.get(owner)
    }

    /// Reward the owner could claim at `now`, without mutating anything.
    pub fn pending_reward(
        &self,
        owner: &AccountId,
        now: Timestamp,
    ) -> Result<Amount, StakingError> {
        let mut preview = self
            .positions
            .get(owner)
            .ok_or_else(|| StakingError::PositionNotFound(owner.to_string()))?
            .clone();
        preview.settle(&self.policy, now)?;
        Ok(preview.accrued_unpaid)
    }

    /// Create the pool and fund its reward reserve from the caller, who
    /// becomes the campaign admin.
    pub fn initialize(
        &mut self,
        ledger: &mut dyn BalanceLedger,
        caller: &AccountId,
        initial_reserve: Amount,
        now: Timestamp,
    ) -> Result<&PoolState, StakingError> {
        if self.pool.is_some() {
            return Err(StakingError::AlreadyInitialized);
        }
        if self.policy.scale == 0 || self.policy.rate > MAX_REWARD_RATE {
            return Err(StakingError::InvalidRate(self.policy.rate));
        }
        let available = ledger.balance_of(caller);
        if available < initial_reserve {
            return Err(StakingError::InsufficientFunds {
                needed: initial_reserve.raw(),
                available: available.raw(),
            });
        }

        ledger.transfer(caller, &self.campaign.reward_vault(), initial_reserve)?;
        let pool = self.pool.insert(PoolState {
            campaign: self.campaign.clone(),
            admin: caller.clone(),
            reward_rate: self.policy.rate,
            total_staked: Amount::ZERO,
            reward_reserve: initial_reserve,
            created_at: now,
        });

        tracing::info!(
            campaign = %self.campaign,
            admin = %caller,
            rate = self.policy.rate,
            reserve = %initial_reserve,
            "pool initialized"
        );
        Ok(pool)
    }

    /// Stake `amount` from the caller's balance into the campaign vault,
    /// creating the caller's position on first use.
    ///
    /// Accrual is settled against the old principal before the new tokens
    /// count, so a top-up never earns retroactively.
    pub fn stake(
        &mut self,
        ledger: &mut dyn BalanceLedger,
        caller: &AccountId,
        amount: Amount,
        now: Timestamp,
    ) -> Result<&UserPosition, StakingError> {
        let pool = self.pool.as_ref().ok_or(StakingError::NotInitialized)?;
        if amount.is_zero() {
            return Err(StakingError::InvalidAmount);
        }
        let available = ledger.balance_of(caller);
        if available < amount {
            return Err(StakingError::InsufficientFunds {
                needed: amount.raw(),
                available: available.raw(),
            });
        }

        // Work on a copy so settlement or arithmetic failure leaves the
        // stored position untouched.
        let mut position = self
            .positions
            .get(caller)
            .cloned()
            .unwrap_or_else(|| UserPosition::new(caller.clone(), now));
        position.settle(&self.policy, now)?;
        position.principal = position
            .principal
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;
        let total_staked = pool
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;

        ledger.transfer(caller, &self.campaign.stake_vault(), amount)?;
        let pool = self.pool.as_mut().ok_or(StakingError::NotInitialized)?;
        pool.total_staked = total_staked;
        self.positions.insert(caller.clone(), position);

        tracing::debug!(
            campaign = %self.campaign,
            owner = %caller,
            amount = %amount,
            total_staked = %pool.total_staked,
            "stake accepted"
        );
        Ok(&self.positions[caller])
    }

    /// Settle accrual and pay the caller's unpaid reward from the reserve.
    ///
    /// Returns the amount actually paid. Only the position owner receives
    /// the payout; the operation is keyed on the caller's own position, so
    /// no identity can trigger or redirect another owner's claim.
    pub fn claim_reward(
        &mut self,
        ledger: &mut dyn BalanceLedger,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<Amount, StakingError> {
        self.pool.as_ref().ok_or(StakingError::NotInitialized)?;
        let mut position = self
            .positions
            .get(caller)
            .ok_or_else(|| StakingError::PositionNotFound(caller.to_string()))?
            .clone();
        position.settle(&self.policy, now)?;

        let payout = self.reward_payout(ledger, position.accrued_unpaid)?;
        ledger.transfer(&self.campaign.reward_vault(), caller, payout)?;

        position.accrued_unpaid = position.accrued_unpaid.saturating_sub(payout);
        let pool = self.pool.as_mut().ok_or(StakingError::NotInitialized)?;
        pool.reward_reserve = pool.reward_reserve.saturating_sub(payout);
        self.positions.insert(caller.clone(), position);

        tracing::info!(
            campaign = %self.campaign,
            owner = %caller,
            paid = %payout,
            reserve = %pool.reward_reserve,
            "reward claimed"
        );
        Ok(payout)
    }

    /// Settle accrual, pay out the reward, and return the full principal,
    /// closing the position.
    ///
    /// Returns the total amount transferred to the caller (principal plus
    /// reward). All-or-nothing: a reserve shortfall under `RequireFull`
    /// fails before anything moves, and the principal leg is pre-checked
    /// against the stake vault — a shortfall there is ledger corruption,
    /// not a normal error.
    pub fn unstake(
        &mut self,
        ledger: &mut dyn BalanceLedger,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<Amount, StakingError> {
        let pool = self.pool.as_ref().ok_or(StakingError::NotInitialized)?;
        let mut position = self
            .positions
            .get(caller)
            .ok_or_else(|| StakingError::PositionNotFound(caller.to_string()))?
            .clone();
        if position.principal.is_zero() {
            return Err(StakingError::ZeroPrincipal);
        }
        position.settle(&self.policy, now)?;

        let principal = position.principal;
        let payout = self.reward_payout(ledger, position.accrued_unpaid)?;
        let vault_balance = ledger.balance_of(&self.campaign.stake_vault());
        if vault_balance < principal {
            return Err(StakingError::CorruptLedger(format!(
                "stake vault holds {} but position principal is {}",
                vault_balance, principal
            )));
        }
        let total_staked = pool
            .total_staked
            .checked_sub(principal)
            .ok_or(StakingError::Overflow)?;
        // The caller receives two credits. Make sure both fit in their
        // balance before the first one moves, or the reward could land
        // while the principal leg fails.
        ledger
            .balance_of(caller)
            .checked_add(payout)
            .and_then(|b| b.checked_add(principal))
            .ok_or(StakingError::Overflow)?;

        ledger.transfer(&self.campaign.reward_vault(), caller, payout)?;
        ledger.transfer(&self.campaign.stake_vault(), caller, principal)?;

        position.accrued_unpaid = position.accrued_unpaid.saturating_sub(payout);
        position.principal = Amount::ZERO;
        let pool = self.pool.as_mut().ok_or(StakingError::NotInitialized)?;
        pool.total_staked = total_staked;
        pool.reward_reserve = pool.reward_reserve.saturating_sub(payout);
        self.positions.insert(caller.clone(), position);

        tracing::info!(
            campaign = %self.campaign,
            owner = %caller,
            principal = %principal,
            reward = %payout,
            "position unstaked"
        );
        principal.checked_add(payout).ok_or(StakingError::Overflow)
    }

    /// Top up the reward reserve from the admin's balance.
    pub fn fund_rewards(
        &mut self,
        ledger: &mut dyn BalanceLedger,
        caller: &AccountId,
        amount: Amount,
    ) -> Result<&PoolState, StakingError> {
        let pool = self.pool.as_ref().ok_or(StakingError::NotInitialized)?;
        if *caller != pool.admin {
            return Err(StakingError::Unauthorized(caller.to_string()));
        }
        if amount.is_zero() {
            return Err(StakingError::InvalidAmount);
        }
        let available = ledger.balance_of(caller);
        if available < amount {
            return Err(StakingError::InsufficientFunds {
                needed: amount.raw(),
                available: available.raw(),
            });
        }
        let reserve = pool
            .reward_reserve
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;

        ledger.transfer(caller, &self.campaign.reward_vault(), amount)?;
        let pool = self.pool.as_mut().ok_or(StakingError::NotInitialized)?;
        pool.reward_reserve = reserve;

        tracing::info!(
            campaign = %self.campaign,
            amount = %amount,
            reserve = %pool.reward_reserve,
            "reward reserve funded"
        );
        Ok(pool)
    }

    /// Resolve how much of `owed` gets paid under the reserve policy and
    /// verify the reward vault can actually cover it.
    fn reward_payout(
        &self,
        ledger: &dyn BalanceLedger,
        owed: Amount,
    ) -> Result<Amount, StakingError> {
        let pool = self.pool.as_ref().ok_or(StakingError::NotInitialized)?;
        let payout = match self.reserve_policy {
            ReservePolicy::RequireFull => {
                if pool.reward_reserve < owed {
                    return Err(StakingError::InsufficientReserve {
                        needed: owed.raw(),
                        available: pool.reward_reserve.raw(),
                    });
                }
                owed
            }
            ReservePolicy::CapToReserve => owed.min(pool.reward_reserve),
        };
        let vault_balance = ledger.balance_of(&self.campaign.reward_vault());
        if vault_balance < payout {
            return Err(StakingError::CorruptLedger(format!(
                "reward vault holds {} but reserve accounting says {}",
                vault_balance,
                pool.reward_reserve
            )));
        }
        Ok(payout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvest_ledger::MemoryLedger;
    use harvest_nullables::NullClock;

    fn admin() -> AccountId {
        AccountId::new("admin")
    }

    fn user() -> AccountId {
        AccountId::new("user")
    }

    /// Engine paying 1 reward per 100 staked per second, plus a funded
    /// ledger: admin and user each start with 1_000_000.
    fn setup() -> (StakingEngine, MemoryLedger, NullClock) {
        let engine = StakingEngine::new(
            CampaignId::new("test"),
            FixedRate::with_scale(1, 100),
            ReservePolicy::RequireFull,
        );
        let mut ledger = MemoryLedger::new();
        ledger.mint(&admin(), Amount::new(1_000_000)).unwrap();
        ledger.mint(&user(), Amount::new(1_000_000)).unwrap();
        (engine, ledger, NullClock::new(1_000))
    }

    fn initialized() -> (StakingEngine, MemoryLedger, NullClock) {
        let (mut engine, mut ledger, clock) = setup();
        engine
            .initialize(&mut ledger, &admin(), Amount::new(500_000), clock.now())
            .unwrap();
        (engine, ledger, clock)
    }

    #[test]
    fn initialize_creates_pool_and_escrows_reserve() {
        let (engine, ledger, _clock) = initialized();
        let pool = engine.pool().unwrap();
        assert_eq!(pool.admin, admin());
        assert_eq!(pool.reward_rate, 1);
        assert_eq!(pool.total_staked, Amount::ZERO);
        assert_eq!(pool.reward_reserve, Amount::new(500_000));
        assert_eq!(
            ledger.balance_of(&engine.campaign().reward_vault()),
            Amount::new(500_000)
        );
        assert_eq!(ledger.balance_of(&admin()), Amount::new(500_000));
    }

    #[test]
    fn initialize_twice_is_rejected_and_rate_unchanged() {
        let (mut engine, mut ledger, clock) = initialized();
        let err = engine
            .initialize(&mut ledger, &admin(), Amount::new(1), clock.now())
            .unwrap_err();
        assert!(matches!(err, StakingError::AlreadyInitialized));
        assert_eq!(engine.pool().unwrap().reward_rate, 1);
        assert_eq!(engine.pool().unwrap().reward_reserve, Amount::new(500_000));
    }

    #[test]
    fn initialize_rejects_unfunded_admin() {
        let (mut engine, mut ledger, clock) = setup();
        let err = engine
            .initialize(&mut ledger, &admin(), Amount::new(2_000_000), clock.now())
            .unwrap_err();
        assert!(matches!(
            err,
            StakingError::InsufficientFunds {
                needed: 2_000_000,
                available: 1_000_000,
            }
        ));
        assert!(engine.pool().is_none());
        assert_eq!(ledger.balance_of(&admin()), Amount::new(1_000_000));
    }

    #[test]
    fn initialize_rejects_absurd_rate() {
        let mut engine = StakingEngine::new(
            CampaignId::new("test"),
            FixedRate::with_scale(MAX_REWARD_RATE + 1, 100),
            ReservePolicy::RequireFull,
        );
        let mut ledger = MemoryLedger::new();
        let err = engine
            .initialize(&mut ledger, &admin(), Amount::ZERO, Timestamp::EPOCH)
            .unwrap_err();
        assert!(matches!(err, StakingError::InvalidRate(_)));
    }

    #[test]
    fn stake_escrows_principal() {
        let (mut engine, mut ledger, clock) = initialized();
        engine
            .stake(&mut ledger, &user(), Amount::new(10_000), clock.now())
            .unwrap();
        let position = engine.position(&user()).unwrap();
        assert_eq!(position.principal, Amount::new(10_000));
        assert_eq!(position.accrued_unpaid, Amount::ZERO);
        assert_eq!(engine.pool().unwrap().total_staked, Amount::new(10_000));
        assert_eq!(
            ledger.balance_of(&engine.campaign().stake_vault()),
            Amount::new(10_000)
        );
        assert_eq!(ledger.balance_of(&user()), Amount::new(990_000));
    }

    #[test]
    fn stake_requires_initialized_pool() {
        let (mut engine, mut ledger, clock) = setup();
        let err = engine
            .stake(&mut ledger, &user(), Amount::new(1), clock.now())
            .unwrap_err();
        assert!(matches!(err, StakingError::NotInitialized));
    }

    #[test]
    fn stake_rejects_zero_amount() {
        let (mut engine, mut ledger, clock) = initialized();
        let err = engine
            .stake(&mut ledger, &user(), Amount::ZERO, clock.now())
            .unwrap_err();
        assert!(matches!(err, StakingError::InvalidAmount));
    }

    #[test]
    fn stake_rejects_overdraw_without_mutation() {
        let (mut engine, mut ledger, clock) = initialized();
        let err = engine
            .stake(&mut ledger, &user(), Amount::new(2_000_000), clock.now())
            .unwrap_err();
        assert!(matches!(err, StakingError::InsufficientFunds { .. }));
        assert!(engine.position(&user()).is_none());
        assert_eq!(engine.pool().unwrap().total_staked, Amount::ZERO);
    }

    #[test]
    fn restake_settles_against_old_principal_first() {
        let (mut engine, mut ledger, clock) = initialized();
        engine
            .stake(&mut ledger, &user(), Amount::new(10_000), clock.now())
            .unwrap();
        clock.advance(50);
        engine
            .stake(&mut ledger, &user(), Amount::new(30_000), clock.now())
            .unwrap();
        let position = engine.position(&user()).unwrap();
        // 50s on the original 10_000 at 1/100 per second.
        assert_eq!(position.accrued_unpaid, Amount::new(5_000));
        assert_eq!(position.principal, Amount::new(40_000));
        assert_eq!(position.checkpoint, clock.now());
    }

    #[test]
    fn claim_pays_accrued_and_second_claim_pays_nothing() {
        let (mut engine, mut ledger, clock) = initialized();
        engine
            .stake(&mut ledger, &user(), Amount::new(10_000), clock.now())
            .unwrap();
        clock.advance(100);
        let paid = engine.claim_reward(&mut ledger, &user(), clock.now()).unwrap();
        assert_eq!(paid, Amount::new(10_000));
        assert_eq!(ledger.balance_of(&user()), Amount::new(1_000_000));
        assert_eq!(
            engine.pool().unwrap().reward_reserve,
            Amount::new(490_000)
        );

        // Zero elapsed time since settlement: nothing more to pay.
        let paid_again = engine.claim_reward(&mut ledger, &user(), clock.now()).unwrap();
        assert_eq!(paid_again, Amount::ZERO);
        assert_eq!(ledger.balance_of(&user()), Amount::new(1_000_000));
    }

    #[test]
    fn claim_without_position_is_rejected() {
        let (mut engine, mut ledger, clock) = initialized();
        let err = engine
            .claim_reward(&mut ledger, &user(), clock.now())
            .unwrap_err();
        assert!(matches!(err, StakingError::PositionNotFound(_)));
    }

    #[test]
    fn claim_shortfall_fails_atomically_under_require_full() {
        let (mut engine, mut ledger, clock) = setup();
        engine
            .initialize(&mut ledger, &admin(), Amount::new(10), clock.now())
            .unwrap();
        engine
            .stake(&mut ledger, &user(), Amount::new(10_000), clock.now())
            .unwrap();
        clock.advance(1_000);
        let user_before = ledger.balance_of(&user());
        let err = engine
            .claim_reward(&mut ledger, &user(), clock.now())
            .unwrap_err();
        // 10_000 staked for 1_000s at 1/100 per second.
        assert!(matches!(
            err,
            StakingError::InsufficientReserve {
                needed: 100_000,
                available: 10,
            }
        ));
        // Nothing moved, and the unsettled accrual is still claimable later.
        assert_eq!(ledger.balance_of(&user()), user_before);
        assert_eq!(engine.pool().unwrap().reward_reserve, Amount::new(10));
        assert_eq!(engine.position(&user()).unwrap().accrued_unpaid, Amount::ZERO);
    }

    #[test]
    fn claim_drains_reserve_under_cap_to_reserve() {
        let mut engine = StakingEngine::new(
            CampaignId::new("test"),
            FixedRate::with_scale(1, 100),
            ReservePolicy::CapToReserve,
        );
        let mut ledger = MemoryLedger::new();
        ledger.mint(&admin(), Amount::new(2_000)).unwrap();
        ledger.mint(&user(), Amount::new(10_000)).unwrap();
        let clock = NullClock::new(1_000);
        engine
            .initialize(&mut ledger, &admin(), Amount::new(30), clock.now())
            .unwrap();
        engine
            .stake(&mut ledger, &user(), Amount::new(10_000), clock.now())
            .unwrap();
        clock.advance(100);

        // Owed 10_000, reserve only 30: pay 30, keep the rest accrued.
        let paid = engine.claim_reward(&mut ledger, &user(), clock.now()).unwrap();
        assert_eq!(paid, Amount::new(30));
        assert_eq!(engine.pool().unwrap().reward_reserve, Amount::ZERO);
        assert_eq!(
            engine.position(&user()).unwrap().accrued_unpaid,
            Amount::new(9_970)
        );

        // Top up and the remainder becomes claimable.
        engine
            .fund_rewards(&mut ledger, &admin(), Amount::new(1_000))
            .unwrap();
        let paid = engine.claim_reward(&mut ledger, &user(), clock.now()).unwrap();
        assert_eq!(paid, Amount::new(1_000));
        assert_eq!(
            engine.position(&user()).unwrap().accrued_unpaid,
            Amount::new(8_970)
        );
    }

    #[test]
    fn unstake_returns_principal_plus_reward_and_closes() {
        let (mut engine, mut ledger, clock) = initialized();
        engine
            .stake(&mut ledger, &user(), Amount::new(10_000), clock.now())
            .unwrap();
        clock.advance(200);
        let returned = engine.unstake(&mut ledger, &user(), clock.now()).unwrap();
        // 200s × 10_000 / 100 = 20_000 reward + 10_000 principal.
        assert_eq!(returned, Amount::new(30_000));
        assert_eq!(ledger.balance_of(&user()), Amount::new(1_020_000));
        let position = engine.position(&user()).unwrap();
        assert!(position.is_closed());
        assert_eq!(engine.pool().unwrap().total_staked, Amount::ZERO);
        assert_eq!(
            ledger.balance_of(&engine.campaign().stake_vault()),
            Amount::ZERO
        );
    }

    #[test]
    fn unstake_rejects_closed_position() {
        let (mut engine, mut ledger, clock) = initialized();
        engine
            .stake(&mut ledger, &user(), Amount::new(100), clock.now())
            .unwrap();
        engine.unstake(&mut ledger, &user(), clock.now()).unwrap();
        let err = engine.unstake(&mut ledger, &user(), clock.now()).unwrap_err();
        assert!(matches!(err, StakingError::ZeroPrincipal));
    }

    #[test]
    fn unstake_reserve_shortfall_leaves_principal_staked() {
        let (mut engine, mut ledger, clock) = setup();
        engine
            .initialize(&mut ledger, &admin(), Amount::new(10), clock.now())
            .unwrap();
        engine
            .stake(&mut ledger, &user(), Amount::new(10_000), clock.now())
            .unwrap();
        clock.advance(1_000);
        let err = engine.unstake(&mut ledger, &user(), clock.now()).unwrap_err();
        assert!(matches!(err, StakingError::InsufficientReserve { .. }));
        // Atomic failure: principal, total_staked, and balances unchanged.
        assert_eq!(engine.position(&user()).unwrap().principal, Amount::new(10_000));
        assert_eq!(engine.pool().unwrap().total_staked, Amount::new(10_000));
        assert_eq!(ledger.balance_of(&user()), Amount::new(990_000));
    }

    #[test]
    fn unstake_detects_drained_stake_vault() {
        let (mut engine, mut ledger, clock) = initialized();
        engine
            .stake(&mut ledger, &user(), Amount::new(10_000), clock.now())
            .unwrap();
        // Move escrowed principal out behind the engine's back.
        ledger
            .transfer(
                &engine.campaign().stake_vault(),
                &AccountId::new("thief"),
                Amount::new(9_999),
            )
            .unwrap();
        let err = engine.unstake(&mut ledger, &user(), clock.now()).unwrap_err();
        assert!(matches!(err, StakingError::CorruptLedger(_)));
        assert_eq!(engine.position(&user()).unwrap().principal, Amount::new(10_000));
    }

    #[test]
    fn unstake_near_max_balance_fails_before_any_transfer() {
        let (mut engine, mut ledger, clock) = initialized();
        engine
            .stake(&mut ledger, &user(), Amount::new(10_000), clock.now())
            .unwrap();
        // Push the caller's balance to where the reward credit still fits
        // but the principal credit would overflow.
        let headroom = Amount::new(u128::MAX - ledger.balance_of(&user()).raw() - 5_000);
        ledger.mint(&user(), headroom).unwrap();
        clock.advance(1);

        let user_before = ledger.balance_of(&user());
        let err = engine.unstake(&mut ledger, &user(), clock.now()).unwrap_err();
        assert!(matches!(err, StakingError::Overflow));
        // Neither leg moved: balances, position, and the reserve's mirror
        // of the reward vault are all intact.
        assert_eq!(ledger.balance_of(&user()), user_before);
        assert_eq!(engine.position(&user()).unwrap().principal, Amount::new(10_000));
        assert_eq!(engine.pool().unwrap().total_staked, Amount::new(10_000));
        assert_eq!(
            ledger.balance_of(&engine.campaign().reward_vault()),
            engine.pool().unwrap().reward_reserve
        );
    }

    #[test]
    fn fund_rewards_is_admin_only() {
        let (mut engine, mut ledger, _clock) = initialized();
        let err = engine
            .fund_rewards(&mut ledger, &user(), Amount::new(100))
            .unwrap_err();
        assert!(matches!(err, StakingError::Unauthorized(_)));

        engine
            .fund_rewards(&mut ledger, &admin(), Amount::new(100))
            .unwrap();
        assert_eq!(engine.pool().unwrap().reward_reserve, Amount::new(500_100));
    }

    #[test]
    fn clock_regression_is_rejected_without_mutation() {
        let (mut engine, mut ledger, clock) = initialized();
        engine
            .stake(&mut ledger, &user(), Amount::new(10_000), clock.now())
            .unwrap();
        let err = engine
            .claim_reward(&mut ledger, &user(), Timestamp::new(clock.now().as_secs() - 1))
            .unwrap_err();
        assert!(matches!(err, StakingError::ClockRegression { .. }));
        assert_eq!(engine.position(&user()).unwrap().checkpoint, clock.now());
    }

    #[test]
    fn pending_reward_previews_without_mutating() {
        let (mut engine, mut ledger, clock) = initialized();
        engine
            .stake(&mut ledger, &user(), Amount::new(10_000), clock.now())
            .unwrap();
        clock.advance(40);
        let pending = engine.pending_reward(&user(), clock.now()).unwrap();
        assert_eq!(pending, Amount::new(4_000));
        // Preview did not settle the stored position.
        assert_eq!(engine.position(&user()).unwrap().accrued_unpaid, Amount::ZERO);
        let paid = engine.claim_reward(&mut ledger, &user(), clock.now()).unwrap();
        assert_eq!(paid, pending);
    }

    #[test]
    fn operations_conserve_total_supply() {
        let (mut engine, mut ledger, clock) = initialized();
        let supply = ledger.total_supply();
        engine
            .stake(&mut ledger, &user(), Amount::new(10_000), clock.now())
            .unwrap();
        clock.advance(77);
        engine.claim_reward(&mut ledger, &user(), clock.now()).unwrap();
        clock.advance(13);
        engine.unstake(&mut ledger, &user(), clock.now()).unwrap();
        assert_eq!(ledger.total_supply(), supply);
    }

    #[test]
    fn engine_from_config_uses_campaign_and_rate() {
        let config = CampaignConfig::from_toml_str(
            "campaign = \"spring\"\nreward_rate = 1\nreward_scale = 100",
        )
        .unwrap();
        let mut engine = StakingEngine::from_config(&config);
        assert_eq!(engine.campaign().as_str(), "spring");

        let mut ledger = MemoryLedger::new();
        ledger.mint(&admin(), Amount::new(1_000)).unwrap();
        ledger.mint(&user(), Amount::new(1_000)).unwrap();
        let clock = NullClock::new(0);
        engine
            .initialize(&mut ledger, &admin(), Amount::new(1_000), clock.now())
            .unwrap();
        engine
            .stake(&mut ledger, &user(), Amount::new(1_000), clock.now())
            .unwrap();
        clock.advance(10);
        // 1_000 × 10 / 100 per the configured rate.
        let paid = engine.claim_reward(&mut ledger, &user(), clock.now()).unwrap();
        assert_eq!(paid, Amount::new(100));
    }

    /// The full lifecycle at the original campaign's parameters: 10^10
    /// staked, reward of 1 per elapsed second.
    #[test]
    fn full_lifecycle_at_unit_reward_per_second() {
        let whole_balance: u128 = 10_000_000_000;
        let mut engine = StakingEngine::new(
            CampaignId::new("blog"),
            FixedRate::with_scale(1, whole_balance),
            ReservePolicy::RequireFull,
        );
        let mut ledger = MemoryLedger::new();
        ledger.mint(&admin(), Amount::new(whole_balance)).unwrap();
        ledger.mint(&user(), Amount::new(whole_balance)).unwrap();
        let clock = NullClock::new(1);

        engine
            .initialize(&mut ledger, &admin(), Amount::new(whole_balance), clock.now())
            .unwrap();

        engine
            .stake(&mut ledger, &user(), Amount::new(whole_balance), clock.now())
            .unwrap();
        assert_eq!(ledger.balance_of(&user()), Amount::ZERO);
        assert_eq!(
            ledger.balance_of(&engine.campaign().stake_vault()),
            Amount::new(whole_balance)
        );

        clock.advance(1);
        let paid = engine.claim_reward(&mut ledger, &user(), clock.now()).unwrap();
        assert_eq!(paid, Amount::new(1));
        assert_eq!(ledger.balance_of(&user()), Amount::new(1));
        assert_eq!(
            ledger.balance_of(&engine.campaign().stake_vault()),
            Amount::new(whole_balance)
        );

        clock.advance(1);
        let returned = engine.unstake(&mut ledger, &user(), clock.now()).unwrap();
        assert_eq!(returned, Amount::new(whole_balance + 1));
        assert_eq!(ledger.balance_of(&user()), Amount::new(whole_balance + 2));
    }
}
