//! Engine state snapshots.
//!
//! The engine itself is storage-agnostic; hosts persist it by taking a
//! snapshot, serializing it (bincode), and restoring it on startup. The
//! accrual policy and reserve policy are campaign configuration, not
//! state — they come back from [`crate::CampaignConfig`], not the
//! snapshot.

use crate::engine::StakingEngine;
use crate::error::StakingError;
use crate::state::{PoolState, UserPosition};
use harvest_types::AccountId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Serializable copy of everything the engine mutates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub pool: Option<PoolState>,
    pub positions: HashMap<AccountId, UserPosition>,
}

impl EngineSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, StakingError> {
        bincode::serialize(self).map_err(|e| StakingError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StakingError> {
        bincode::deserialize(bytes).map_err(|e| StakingError::Serialization(e.to_string()))
    }
}

impl StakingEngine {
    /// Capture the pool and all positions.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            pool: self.pool.clone(),
            positions: self.positions.clone(),
        }
    }

    /// Replace the engine's state with a previously captured snapshot.
    pub fn restore(&mut self, snapshot: EngineSnapshot) {
        self.pool = snapshot.pool;
        self.positions = snapshot.positions;
    }
}
