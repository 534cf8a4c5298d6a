//! Account identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque account identity on the balance ledger.
///
/// The engine never interprets the contents — it only compares identities
/// for authorization and hands them to the ledger for transfers. Hosts map
/// these to whatever their balance store keys on (public keys, database
/// rows, test strings).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
