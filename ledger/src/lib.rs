//! Abstract balance ledger for the harvest staking engine.
//!
//! The staking engine never stores token balances itself — it moves value
//! through the [`BalanceLedger`] trait. Any backend (in-memory map,
//! database, external balance service) can implement it; the engine
//! depends only on the trait.

pub mod error;
pub mod memory;

pub use error::LedgerError;
pub use memory::MemoryLedger;

use harvest_types::{AccountId, Amount};

/// Fungible-balance store the engine transfers value through.
///
/// Implementations must be conservative: `transfer` debits and credits
/// atomically, never leaves a balance negative, and never invents or
/// destroys value. A failed transfer leaves both balances untouched.
pub trait BalanceLedger {
    /// Move `amount` from one account to another.
    ///
    /// A zero-amount transfer is a no-op and always succeeds.
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Current balance of an account. Unknown accounts hold zero.
    fn balance_of(&self, account: &AccountId) -> Amount;
}
