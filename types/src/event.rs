//! Observable pool events.
//!
//! Every successful mutating operation appends the events it produced to the
//! pool's event log. Failed operations append nothing.

use crate::{Address, AssetId, PositionId};
use serde::{Deserialize, Serialize};

/// One observable state transition of the pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolEvent {
    /// A participant locked `amount` of the staking currency.
    Staked { participant: Address, amount: u64 },
    /// A participant withdrew `amount` of the staking currency.
    Withdrawn { participant: Address, amount: u64 },
    /// A participant entered the active-staker registry at `index`.
    StakerAdded { participant: Address, index: usize },
    /// A participant left the registry; `index` is the slot vacated
    /// (the previously-last staker now occupies it).
    StakerRemoved { participant: Address, index: usize },
    /// Fee income collected from a custodied position.
    FeesCollected {
        position: PositionId,
        amount0: u64,
        amount1: u64,
    },
    /// A full custody balance of `asset` was distributed pro-rata.
    FeesDistributed { asset: AssetId, amount: u64 },
    /// A participant settled their unclaimed balance of `asset`.
    RewardsClaimed {
        participant: Address,
        asset: AssetId,
        amount: u64,
    },
}
