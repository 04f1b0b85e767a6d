//! Port to the external position-management subsystem.

use weir_types::{Address, PositionId};

/// The external subsystem that custodies yield-bearing positions and pays
/// out their accrued fees on demand.
pub trait PositionManager {
    /// Collect up to (`max0`, `max1`) of the position's accrued fee income
    /// into `recipient`'s custody. Returns the two amounts actually
    /// collected. Collecting from a position with nothing accrued returns
    /// `(0, 0)` rather than failing.
    fn collect(
        &mut self,
        position: PositionId,
        recipient: &Address,
        max0: u64,
        max1: u64,
    ) -> (u64, u64);

    /// Transfer custody of `position` from `from` to `to`.
    ///
    /// Returns `false` on failure; the caller rolls back. The receiving side
    /// acknowledges inbound custody unconditionally — the pool never rejects
    /// a position pushed to it.
    fn transfer_custody(&mut self, from: &Address, to: &Address, position: PositionId) -> bool;
}
