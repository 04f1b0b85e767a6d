//! The registered-position set and its custody operations.

use crate::error::PositionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use weir_ports::PositionManager;
use weir_types::{Address, PositionId};

/// The set of external positions the pool custodies for its owner.
///
/// Membership is binary; all operations are owner-gated by the facade.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PositionBook {
    registered: BTreeSet<PositionId>,
}

impl PositionBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_registered(&self, position: PositionId) -> bool {
        self.registered.contains(&position)
    }

    pub fn registered(&self) -> impl Iterator<Item = PositionId> + '_ {
        self.registered.iter().copied()
    }

    /// Record `position` as custodied, without moving custody.
    ///
    /// Used when custody already rests with the pool (e.g. a position pushed
    /// to it directly, which the pool always accepts).
    pub fn register(&mut self, position: PositionId) -> Result<(), PositionError> {
        if !self.registered.insert(position) {
            return Err(PositionError::PositionAlreadyRegistered(position));
        }
        Ok(())
    }

    /// Pull custody of `position` from `owner` into `pool`, then register it.
    pub fn deposit(
        &mut self,
        position: PositionId,
        manager: &mut dyn PositionManager,
        owner: &Address,
        pool: &Address,
    ) -> Result<(), PositionError> {
        if self.registered.contains(&position) {
            return Err(PositionError::PositionAlreadyRegistered(position));
        }
        if !manager.transfer_custody(owner, pool, position) {
            return Err(PositionError::TransferFailed(position));
        }
        self.registered.insert(position);
        Ok(())
    }

    /// Unregister `position`, then hand custody back to `owner`.
    ///
    /// Unregister-first, transfer-second is the checks-effects-interactions
    /// ordering; a failed transfer re-registers so the book still matches
    /// custody.
    pub fn withdraw(
        &mut self,
        position: PositionId,
        manager: &mut dyn PositionManager,
        pool: &Address,
        owner: &Address,
    ) -> Result<(), PositionError> {
        if !self.registered.remove(&position) {
            return Err(PositionError::PositionNotRegistered(position));
        }
        if !manager.transfer_custody(pool, owner, position) {
            self.registered.insert(position);
            return Err(PositionError::TransferFailed(position));
        }
        Ok(())
    }

    /// Collect the position's full accrued fee income into pool custody.
    ///
    /// Returns the two collected amounts as reported by the manager.
    pub fn collect(
        &self,
        position: PositionId,
        manager: &mut dyn PositionManager,
        pool: &Address,
    ) -> Result<(u64, u64), PositionError> {
        if !self.registered.contains(&position) {
            return Err(PositionError::PositionNotRegistered(position));
        }
        Ok(manager.collect(position, pool, u64::MAX, u64::MAX))
    }
}
