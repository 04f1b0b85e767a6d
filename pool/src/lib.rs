//! The WEIR fee pool facade.
//!
//! `FeePool` glues the accounting crates to the external collaborator ports
//! and enforces the cross-cutting rules the inner crates stay free of:
//! - owner gating for privileged operations
//! - the re-entrancy guard held across every mutating operation
//! - checks-effects-interactions ordering with rollback on failed transfers
//! - the observable event log

pub mod error;
pub mod guard;
pub mod pool;

pub use error::PoolError;
pub use guard::{GuardScope, ReentrancyGuard};
pub use pool::FeePool;
