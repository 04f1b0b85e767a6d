//! Distribution-specific errors.

use thiserror::Error;
use weir_types::AssetId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DistributionError {
    #[error("no active stakers to distribute to")]
    NoStakers,

    #[error("no custody balance of asset {asset} to distribute")]
    NoFeesToDistribute { asset: AssetId },

    #[error("arithmetic overflow crediting rewards")]
    Overflow,
}
