//! Staking ledger — the accounting core of the WEIR pool.
//!
//! This crate is pure bookkeeping: it never calls out to external
//! collaborators. The `FeePool` facade performs external currency transfers
//! after the accounting here has settled (checks-effects-interactions) and
//! rolls the accounting back if a transfer fails.
//!
//! Handles:
//! - The active-staker registry (dense array + inverse index, O(1) swap-remove)
//! - Stake / top-up / withdraw accounting with `total_staked` conservation
//! - The minimum-holding-period rule (top-ups restart the lock for the
//!   entire balance)
//! - Fixed-point share queries

pub mod error;
pub mod ledger;
pub mod registry;

pub use error::StakingError;
pub use ledger::{Stake, StakingLedger, WithdrawOutcome};
pub use registry::StakeRegistry;
