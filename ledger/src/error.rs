//! Ledger errors.

use harvest_types::AccountId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient funds in {account}: need {needed}, available {available}")]
    InsufficientFunds {
        account: AccountId,
        needed: u128,
        available: u128,
    },

    #[error("arithmetic overflow crediting {account}")]
    BalanceOverflow { account: AccountId },
}
