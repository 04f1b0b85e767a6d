//! Pro-rata fee distribution for the WEIR pool.
//!
//! The engine reads a snapshot of the staking ledger (active registry order
//! and `total_staked`), computes floor-division shares with double-width
//! intermediates, and credits the reward ledger. The staker occupying the
//! LAST registry slot absorbs the division remainder, so the sum of credited
//! shares equals the swept balance exactly — no dust is ever created or lost.
//!
//! All credits are staged before any are applied: a failing asset aborts the
//! whole call with the reward ledger untouched.

pub mod engine;
pub mod error;
pub mod rewards;

pub use engine::{distribute, AssetDistribution};
pub use error::DistributionError;
pub use rewards::RewardLedger;
