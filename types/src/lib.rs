//! Fundamental types for the WEIR pool.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: participant addresses, asset and position identifiers,
//! timestamps, pool parameters, and observable events.

pub mod address;
pub mod asset;
pub mod event;
pub mod params;
pub mod time;

pub use address::Address;
pub use asset::{AssetId, PositionId};
pub use event::PoolEvent;
pub use params::{PoolParams, SHARE_SCALE};
pub use time::Timestamp;
