//! Nullable collaborators for deterministic testing.
//!
//! Every external dependency of the pool (clock, currency custody, asset
//! tokens, the position manager) is abstracted behind a trait in
//! `weir-ports`. This crate provides implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically (advance time, mint balances,
//!   script transfer failures)
//! - Never touch a real ledger, filesystem, or network
//!
//! Usage: swap real collaborators for nullables in tests and the demo daemon.

pub mod assets;
pub mod clock;
pub mod currency;
pub mod positions;

pub use assets::NullAssetBank;
pub use clock::NullClock;
pub use currency::NullCurrency;
pub use positions::NullPositionManager;
