//! Staking-specific errors.

use thiserror::Error;
use weir_types::Timestamp;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StakingError {
    #[error("amount must be non-zero")]
    InvalidAmount,

    #[error("participant has no active stake")]
    NoActiveStake,

    #[error("stake is locked until {unlock_at}")]
    LockNotElapsed { unlock_at: Timestamp },

    #[error("insufficient staked balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u64, available: u64 },

    #[error("participant is already in the active-staker registry")]
    AlreadyRegistered,

    #[error("participant is not in the active-staker registry")]
    NotRegistered,

    #[error("arithmetic overflow in stake accounting")]
    Overflow,
}
