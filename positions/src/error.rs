//! Position-custody errors.

use thiserror::Error;
use weir_types::PositionId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("position {0} is not registered")]
    PositionNotRegistered(PositionId),

    #[error("position {0} is already registered")]
    PositionAlreadyRegistered(PositionId),

    #[error("custody transfer of position {0} failed")]
    TransferFailed(PositionId),
}
