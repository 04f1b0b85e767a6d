//! Scoped re-entrancy guard.
//!
//! Every mutating pool operation acquires the guard on entry and releases it
//! when its scope ends (guaranteed by `Drop`, including on early error
//! return). A nested acquisition while the flag is held — e.g. a malicious
//! transfer callback calling back into the pool — is rejected.

use crate::error::PoolError;
use std::cell::Cell;
use std::rc::Rc;

/// The shared lock flag.
///
/// Handed out as `Rc` so injected collaborators can be given a handle and
/// their re-entry attempts observably rejected in tests.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    entered: Cell<bool>,
}

impl ReentrancyGuard {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Acquire the guard, failing if it is already held.
    pub fn try_enter(self: &Rc<Self>) -> Result<GuardScope, PoolError> {
        if self.entered.replace(true) {
            return Err(PoolError::ReentrancyRejected);
        }
        Ok(GuardScope {
            guard: Rc::clone(self),
        })
    }

    /// Whether a guarded operation is currently in progress.
    pub fn is_held(&self) -> bool {
        self.entered.get()
    }
}

/// RAII scope: releases the guard when dropped.
pub struct GuardScope {
    guard: Rc<ReentrancyGuard>,
}

impl Drop for GuardScope {
    fn drop(&mut self) {
        self.guard.entered.set(false);
    }
}
