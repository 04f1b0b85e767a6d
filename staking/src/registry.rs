//! Active-staker registry — dense array + inverse index.
//!
//! Membership add/remove/lookup are all O(1). Removal uses swap-remove:
//! the last member moves into the vacated slot, so iteration order is NOT
//! stable across removals. Contiguous-index iteration stays valid at all
//! times — there are never gaps.

use crate::error::StakingError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use weir_types::Address;

/// Dense registry of active stakers.
///
/// Invariant: for every member P, `members[slots[P]] == P`, and
/// `members.len() == slots.len()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StakeRegistry {
    members: Vec<Address>,
    slots: HashMap<Address, usize>,
}

impl StakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active stakers.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `participant` is a member.
    pub fn contains(&self, participant: &Address) -> bool {
        self.slots.contains_key(participant)
    }

    /// The member at `index`, if any.
    pub fn at(&self, index: usize) -> Option<&Address> {
        self.members.get(index)
    }

    /// The slot `participant` currently occupies, if a member.
    pub fn slot_of(&self, participant: &Address) -> Option<usize> {
        self.slots.get(participant).copied()
    }

    /// All members in current slot order.
    pub fn members(&self) -> &[Address] {
        &self.members
    }

    /// Append `participant` at the end. Returns the assigned slot.
    pub fn add(&mut self, participant: &Address) -> Result<usize, StakingError> {
        if self.slots.contains_key(participant) {
            return Err(StakingError::AlreadyRegistered);
        }
        let slot = self.members.len();
        self.members.push(participant.clone());
        self.slots.insert(participant.clone(), slot);
        Ok(slot)
    }

    /// Remove `participant` by swap-remove. Returns the vacated slot.
    ///
    /// The previously-last member now occupies the vacated slot (unless the
    /// removed member was last).
    pub fn remove(&mut self, participant: &Address) -> Result<usize, StakingError> {
        let slot = self
            .slots
            .remove(participant)
            .ok_or(StakingError::NotRegistered)?;
        self.members.swap_remove(slot);
        // The former last member now sits at `slot` (if one was moved).
        if let Some(moved) = self.members.get(slot) {
            self.slots.insert(moved.clone(), slot);
        }
        Ok(slot)
    }
}
