//! Staking pool engine — deposit accounting, time-based reward accrual,
//! claiming, and principal withdrawal.
//!
//! One [`StakingEngine`] manages one campaign: a shared [`PoolState`]
//! plus one [`UserPosition`] per staker. Rewards accrue per position at
//! a fixed rate — `floor(principal × rate × elapsed / scale)` — and every
//! operation settles accrual before touching principal, so elapsed time
//! is always measured against a constant stake.
//!
//! The engine holds no token balances itself. Principal and reward funds
//! live on a [`harvest_ledger::BalanceLedger`] in two campaign-derived
//! vault accounts, and each operation is all-or-nothing: preconditions
//! are checked before any state or ledger mutation.

pub mod accrual;
pub mod config;
pub mod engine;
pub mod error;
pub mod snapshot;
pub mod state;

pub use accrual::{FixedRate, RewardPolicy, REWARD_SCALE};
pub use config::{CampaignConfig, ReservePolicy};
pub use engine::StakingEngine;
pub use error::StakingError;
pub use snapshot::EngineSnapshot;
pub use state::{PoolState, UserPosition};
