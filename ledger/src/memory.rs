//! In-memory ledger backend.

use crate::{BalanceLedger, LedgerError};
use harvest_types::{AccountId, Amount};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A `HashMap`-backed ledger for tests and single-process hosts.
///
/// Accounts are created lazily on first credit; a missing entry reads as
/// a zero balance.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryLedger {
    balances: HashMap<AccountId, u128>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account out of thin air.
    ///
    /// This is the genesis/faucet path — the one place value enters the
    /// ledger. Everything after that moves through `transfer`.
    pub fn mint(&mut self, account: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        let balance = self.balances.entry(account.clone()).or_insert(0);
        *balance = balance
            .checked_add(amount.raw())
            .ok_or(LedgerError::BalanceOverflow {
                account: account.clone(),
            })?;
        Ok(())
    }

    /// Sum of every balance on the ledger.
    ///
    /// Invariant under `transfer`; changes only via `mint`. Conservation
    /// checks in tests compare this before and after operation sequences.
    pub fn total_supply(&self) -> u128 {
        self.balances.values().sum()
    }
}

impl BalanceLedger for MemoryLedger {
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Ok(());
        }
        let available = self.balance_of(from).raw();
        if available < amount.raw() {
            return Err(LedgerError::InsufficientFunds {
                account: from.clone(),
                needed: amount.raw(),
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        // Check the credit side before touching either balance so a
        // failure leaves the ledger untouched.
        let to_balance = self.balance_of(to).raw();
        let credited = to_balance
            .checked_add(amount.raw())
            .ok_or(LedgerError::BalanceOverflow { account: to.clone() })?;
        self.balances.insert(from.clone(), available - amount.raw());
        self.balances.insert(to.clone(), credited);
        Ok(())
    }

    fn balance_of(&self, account: &AccountId) -> Amount {
        Amount::new(self.balances.get(account).copied().unwrap_or(0))
    }
}
