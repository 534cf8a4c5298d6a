//! Staking-specific errors.

use harvest_ledger::LedgerError;
use harvest_types::Timestamp;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StakingError {
    #[error("pool already initialized for this campaign")]
    AlreadyInitialized,

    #[error("pool not initialized")]
    NotInitialized,

    #[error("reward rate {0} exceeds the configured ceiling or scale is zero")]
    InvalidRate(u128),

    #[error("amount must be non-zero")]
    InvalidAmount,

    #[error("insufficient funds: need {needed}, available {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    #[error("no position found for {0}")]
    PositionNotFound(String),

    #[error("position has no staked principal")]
    ZeroPrincipal,

    #[error("reward reserve too small: need {needed}, available {available}")]
    InsufficientReserve { needed: u128, available: u128 },

    #[error("arithmetic overflow in reward computation")]
    Overflow,

    #[error("caller {0} is not authorized for this operation")]
    Unauthorized(String),

    #[error("clock regressed: now {now} is before checkpoint {checkpoint}")]
    ClockRegression {
        checkpoint: Timestamp,
        now: Timestamp,
    },

    /// A vault balance diverged from the pool's own accounting. This is
    /// never a normal runtime condition — it means escrowed value was
    /// moved behind the engine's back.
    #[error("ledger diverged from pool accounting: {0}")]
    CorruptLedger(String),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("snapshot serialization failed: {0}")]
    Serialization(String),
}
