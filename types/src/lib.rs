//! Fundamental types shared across the harvest staking engine.

pub mod account;
pub mod amount;
pub mod campaign;
pub mod time;

pub use account::AccountId;
pub use amount::Amount;
pub use campaign::CampaignId;
pub use time::Timestamp;
