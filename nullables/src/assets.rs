//! Nullable external asset bank.

use std::collections::{HashMap, HashSet};
use weir_ports::AssetPort;
use weir_types::{Address, AssetId};

/// In-memory balances for any number of asset types, with per-asset
/// scriptable transfer failure.
///
/// `transfer` debits the pool holder set on construction and credits the
/// recipient, so claim-path conservation is observable end to end.
#[derive(Debug)]
pub struct NullAssetBank {
    pool: Address,
    balances: HashMap<(AssetId, Address), u64>,
    failing_assets: HashSet<AssetId>,
}

impl NullAssetBank {
    /// `pool` is the holder debited by outbound transfers.
    pub fn new(pool: Address) -> Self {
        Self {
            pool,
            balances: HashMap::new(),
            failing_assets: HashSet::new(),
        }
    }

    /// Credit `amount` of `asset` to `holder` out of thin air.
    pub fn mint(&mut self, asset: &AssetId, holder: &Address, amount: u64) {
        *self
            .balances
            .entry((asset.clone(), holder.clone()))
            .or_insert(0) += amount;
    }

    /// Make every transfer of `asset` fail until cleared.
    pub fn fail_transfers_of(&mut self, asset: &AssetId) {
        self.failing_assets.insert(asset.clone());
    }

    pub fn clear_failures(&mut self) {
        self.failing_assets.clear();
    }
}

impl AssetPort for NullAssetBank {
    fn balance_of(&self, asset: &AssetId, holder: &Address) -> u64 {
        self.balances
            .get(&(asset.clone(), holder.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(&mut self, asset: &AssetId, to: &Address, amount: u64) -> bool {
        if self.failing_assets.contains(asset) {
            return false;
        }
        let from_key = (asset.clone(), self.pool.clone());
        let Some(balance) = self.balances.get_mut(&from_key) else {
            return amount == 0;
        };
        if *balance < amount {
            return false;
        }
        *balance -= amount;
        *self.balances.entry((asset.clone(), to.clone())).or_insert(0) += amount;
        true
    }
}
