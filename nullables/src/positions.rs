//! Nullable position manager.

use std::collections::HashMap;
use weir_ports::PositionManager;
use weir_types::{Address, PositionId};

/// In-memory position custody with programmable fee accrual.
///
/// `collect` drains whatever accrual was scripted with
/// [`accrue`](NullPositionManager::accrue); the corresponding asset balances
/// are minted into a `NullAssetBank` separately by the test, mirroring how
/// the real subsystem pays collected fees straight into pool custody.
#[derive(Debug, Default)]
pub struct NullPositionManager {
    custody: HashMap<PositionId, Address>,
    accrued: HashMap<PositionId, (u64, u64)>,
    fail_transfers: bool,
}

impl NullPositionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `position` held by `holder`.
    pub fn create(&mut self, position: PositionId, holder: &Address) {
        self.custody.insert(position, holder.clone());
    }

    /// Script accrued fee income awaiting collection.
    pub fn accrue(&mut self, position: PositionId, amount0: u64, amount1: u64) {
        let entry = self.accrued.entry(position).or_insert((0, 0));
        entry.0 += amount0;
        entry.1 += amount1;
    }

    pub fn holder_of(&self, position: PositionId) -> Option<&Address> {
        self.custody.get(&position)
    }

    /// Make every custody transfer fail until cleared.
    pub fn fail_transfers(&mut self, fail: bool) {
        self.fail_transfers = fail;
    }
}

impl PositionManager for NullPositionManager {
    fn collect(
        &mut self,
        position: PositionId,
        _recipient: &Address,
        max0: u64,
        max1: u64,
    ) -> (u64, u64) {
        let Some(entry) = self.accrued.get_mut(&position) else {
            return (0, 0);
        };
        let take0 = entry.0.min(max0);
        let take1 = entry.1.min(max1);
        entry.0 -= take0;
        entry.1 -= take1;
        (take0, take1)
    }

    fn transfer_custody(&mut self, from: &Address, to: &Address, position: PositionId) -> bool {
        if self.fail_transfers {
            return false;
        }
        match self.custody.get(&position) {
            Some(holder) if holder == from => {
                self.custody.insert(position, to.clone());
                true
            }
            _ => false,
        }
    }
}
