//! Thread-safe handle for hosting one token behind concurrent callers.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use wlt_types::{Principal, TokenAmount, TokenEvent};

use crate::error::TokenError;
use crate::operation::Operation;
use crate::service::TokenService;
use crate::snapshot::TokenSnapshot;

/// Cloneable, `Send + Sync` handle to a [`TokenService`].
///
/// Queries share a read lock; every mutation takes the write lock, so each
/// operation is serialized against all others. Operations never panic
/// between validation and mutation, so a poisoned lock still guards a
/// consistent state and is recovered instead of propagated.
#[derive(Clone)]
pub struct SharedToken {
    inner: Arc<RwLock<TokenService>>,
}

impl SharedToken {
    pub fn new(service: TokenService) -> Self {
        Self {
            inner: Arc::new(RwLock::new(service)),
        }
    }

    /// Run a read-only closure against the token.
    pub fn read<R>(&self, f: impl FnOnce(&TokenService) -> R) -> R {
        f(&self.read_guard())
    }

    /// Run a closure with exclusive access to the token.
    pub fn write<R>(&self, f: impl FnOnce(&mut TokenService) -> R) -> R {
        f(&mut self.write_guard())
    }

    pub fn apply(&self, caller: &Principal, op: &Operation) -> Result<Vec<TokenEvent>, TokenError> {
        self.write_guard().apply(caller, op)
    }

    pub fn balance_of(&self, p: &Principal) -> TokenAmount {
        self.read_guard().balance_of(p)
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.read_guard().total_supply()
    }

    pub fn snapshot(&self) -> TokenSnapshot {
        self.read_guard().snapshot()
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, TokenService> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, TokenService> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
