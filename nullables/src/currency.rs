//! Nullable staking-currency custody.

use std::collections::HashMap;
use weir_ports::CurrencyPort;
use weir_types::Address;

/// In-memory staking-currency balances with scriptable failure.
///
/// Tracks only what leaves pool custody — the pool never initiates inbound
/// transfers, so deposits are modeled by simply not modeling them.
#[derive(Default)]
pub struct NullCurrency {
    received: HashMap<Address, u64>,
    /// When set, the next `transfer` reports failure and clears the flag.
    fail_next: bool,
}

impl NullCurrency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total currency this double has paid out to `holder`.
    pub fn received_by(&self, holder: &Address) -> u64 {
        self.received.get(holder).copied().unwrap_or(0)
    }

    /// Make the next transfer fail.
    pub fn fail_next_transfer(&mut self) {
        self.fail_next = true;
    }
}

impl CurrencyPort for NullCurrency {
    fn transfer(&mut self, to: &Address, amount: u64) -> bool {
        if self.fail_next {
            self.fail_next = false;
            return false;
        }
        *self.received.entry(to.clone()).or_insert(0) += amount;
        true
    }
}
