//! Pool-level errors — the full failure taxonomy callers can branch on.

use thiserror::Error;
use weir_distribution::DistributionError;
use weir_positions::PositionError;
use weir_staking::StakingError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("caller is not the pool owner")]
    Unauthorized,

    #[error("re-entrant call rejected: an operation is already in progress")]
    ReentrancyRejected,

    #[error("external transfer failed")]
    TransferFailed,

    #[error("nothing to claim for the requested assets")]
    NothingToClaim,

    #[error(transparent)]
    Staking(#[from] StakingError),

    #[error(transparent)]
    Distribution(#[from] DistributionError),

    #[error(transparent)]
    Position(#[from] PositionError),
}
