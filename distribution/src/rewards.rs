//! Per-(participant, asset) unclaimed-reward balances.

use crate::error::DistributionError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use weir_types::{Address, AssetId};

/// Unclaimed reward balances, keyed by participant and asset.
///
/// Entries are created implicitly by the first credit and zeroed by claim;
/// a balance is never negative. The claim settlement path is built on
/// [`take`](RewardLedger::take) / [`restore`](RewardLedger::restore) so the
/// facade can keep zero-then-transfer atomic per asset.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RewardLedger {
    unclaimed: HashMap<(Address, AssetId), u64>,
}

impl RewardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current unclaimed balance.
    pub fn unclaimed(&self, participant: &Address, asset: &AssetId) -> u64 {
        self.unclaimed
            .get(&(participant.clone(), asset.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Additive credit from distribution.
    pub fn credit(
        &mut self,
        participant: &Address,
        asset: &AssetId,
        amount: u64,
    ) -> Result<(), DistributionError> {
        let entry = self
            .unclaimed
            .entry((participant.clone(), asset.clone()))
            .or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or(DistributionError::Overflow)?;
        Ok(())
    }

    /// Zero the unclaimed balance and return what it was.
    pub fn take(&mut self, participant: &Address, asset: &AssetId) -> u64 {
        self.unclaimed
            .remove(&(participant.clone(), asset.clone()))
            .unwrap_or(0)
    }

    /// Put back a balance removed by [`take`](RewardLedger::take) whose
    /// external transfer failed.
    pub fn restore(&mut self, participant: &Address, asset: &AssetId, amount: u64) {
        if amount > 0 {
            self.unclaimed
                .insert((participant.clone(), asset.clone()), amount);
        }
    }
}
