//! Campaign configuration with TOML file support.

use crate::accrual::{FixedRate, REWARD_SCALE};
use crate::error::StakingError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do when the reward reserve cannot cover a payout.
///
/// Deliberately a configuration choice, not a hard-wired policy: some
/// campaigns would rather fail loudly and be re-funded, others prefer to
/// drain the reserve and carry the shortfall as unpaid accrual.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservePolicy {
    /// Fail the whole operation with `InsufficientReserve`. No partial
    /// payout; retrying is safe once the reserve is topped up.
    #[default]
    RequireFull,
    /// Pay out whatever the reserve holds; the remainder stays in
    /// `accrued_unpaid` and can be claimed after a top-up.
    CapToReserve,
}

/// Configuration for one staking campaign.
///
/// Can be loaded from a TOML file via [`CampaignConfig::from_toml_file`]
/// or built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// Campaign identity; also derives the vault accounts.
    #[serde(default = "default_campaign")]
    pub campaign: String,

    /// Reward per staked raw unit per second, against `reward_scale`.
    pub reward_rate: u64,

    /// Fixed-point denominator for the reward rate.
    #[serde(default = "default_reward_scale")]
    pub reward_scale: u64,

    /// Reserve transferred from the admin at initialization.
    #[serde(default)]
    pub initial_reserve: u64,

    /// Behavior when the reserve cannot cover a payout.
    #[serde(default)]
    pub reserve_policy: ReservePolicy,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_campaign() -> String {
    "dev".to_string()
}

fn default_reward_scale() -> u64 {
    // REWARD_SCALE fits u64 (10^12).
    REWARD_SCALE as u64
}

impl CampaignConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, StakingError> {
        toml::from_str(raw).map_err(|e| StakingError::Serialization(e.to_string()))
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, StakingError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StakingError::Serialization(e.to_string()))?;
        Self::from_toml_str(&raw)
    }

    /// The accrual policy this configuration describes.
    pub fn fixed_rate(&self) -> FixedRate {
        FixedRate::with_scale(self.reward_rate as u128, self.reward_scale as u128)
    }
}
