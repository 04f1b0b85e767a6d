//! Pool parameters.
//!
//! Everything the pool's behavior is tunable by lives here, so a wrapping
//! surface (the demo daemon, a host contract) can load it from configuration.

use serde::{Deserialize, Serialize};

/// Fixed-point scale used by share queries (1e18).
///
/// Display/query precision only — the distribution arithmetic never uses it.
pub const SHARE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Tunable pool parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolParams {
    /// Minimum seconds a balance must stay staked after the most recent
    /// stake or top-up before withdrawal is permitted.
    pub min_stake_period_secs: u64,
}

impl PoolParams {
    /// The intended live configuration: a 7-day lock.
    pub fn mainnet_defaults() -> Self {
        Self {
            min_stake_period_secs: 7 * 24 * 3600,
        }
    }
}

impl Default for PoolParams {
    fn default() -> Self {
        Self::mainnet_defaults()
    }
}
