//! Balance and transfer port for external reward assets.

use weir_types::{Address, AssetId};

/// Read and move balances of the external fungible assets the pool
/// distributes as rewards.
pub trait AssetPort {
    /// Current balance of `holder` in `asset`, in smallest units.
    fn balance_of(&self, asset: &AssetId, holder: &Address) -> u64;

    /// Transfer `amount` of `asset` from pool custody to `to`.
    ///
    /// Returns `false` on failure; the caller rolls back.
    fn transfer(&mut self, asset: &AssetId, to: &Address, amount: u64) -> bool;
}
