//! Position custody for the WEIR pool.
//!
//! A thin pass-through to the external position-management subsystem: the
//! pool registers the positions it custodies, collects their accrued fee
//! income into its own asset custody, and can hand custody back. The hard
//! accounting lives elsewhere — this crate only keeps the registered set
//! consistent with actual custody.

pub mod book;
pub mod error;

pub use book::PositionBook;
pub use error::PositionError;
