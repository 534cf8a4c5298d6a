//! Nullable infrastructure — deterministic stand-ins for testing.

pub mod clock;

pub use clock::NullClock;
