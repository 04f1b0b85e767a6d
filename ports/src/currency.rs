//! Outbound transfer port for the staking currency.

use weir_types::Address;

/// Outbound transfers of the staking currency out of pool custody.
///
/// Inbound deposits (stake funding, including unsolicited direct transfers)
/// happen entirely on the collaborator's side and are always accepted — the
/// pool only ever initiates outbound movement, on withdraw.
pub trait CurrencyPort {
    /// Transfer `amount` smallest units from pool custody to `to`.
    ///
    /// Returns `false` if the transfer did not succeed; the caller must then
    /// roll back whatever internal state the transfer was settling.
    fn transfer(&mut self, to: &Address, amount: u64) -> bool;
}
