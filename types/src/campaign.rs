//! Staking-campaign identity and its derived pool accounts.

use crate::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a staking campaign.
///
/// Exactly one pool exists per campaign. The campaign id also derives the
/// two ledger accounts the pool owns: the stake vault (escrowed principal)
/// and the reward vault (the pre-funded reward reserve). Deriving them
/// from the campaign id keeps the mapping deterministic — any component
/// holding the id can name the vaults without extra state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CampaignId(String);

impl CampaignId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ledger account holding all escrowed principal for this campaign.
    pub fn stake_vault(&self) -> AccountId {
        AccountId::new(format!("vault:stake:{}", self.0))
    }

    /// Ledger account holding the campaign's reward reserve.
    pub fn reward_vault(&self) -> AccountId {
        AccountId::new(format!("vault:reward:{}", self.0))
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CampaignId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
