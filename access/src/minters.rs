//! The minter role set.

use std::collections::HashSet;

use wlt_types::Principal;

use crate::error::AccessError;
use crate::registry::{sorted, AccessRegistry};
use crate::role::Role;

/// Principals allowed to mint while minting is open.
///
/// Kept apart from the KYC admins so the owner can delegate supply creation
/// and whitelist curation independently. Ownership is read from the
/// [`AccessRegistry`] passed in, so the owner is always a minter even after
/// an ownership transfer.
#[derive(Clone, Debug, Default)]
pub struct MinterRegistry {
    minters: HashSet<Principal>,
}

impl MinterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_minter(&self, access: &AccessRegistry, p: &Principal) -> bool {
        access.is_owner(p) || self.minters.contains(p)
    }

    pub fn require_minter(&self, access: &AccessRegistry, caller: &Principal) -> Result<(), AccessError> {
        if self.is_minter(access, caller) {
            Ok(())
        } else {
            Err(AccessError::unauthorized(caller, Role::Minter))
        }
    }

    pub fn add_minter(
        &mut self,
        access: &AccessRegistry,
        caller: &Principal,
        p: &Principal,
    ) -> Result<bool, AccessError> {
        access.require_owner(caller)?;
        let added = self.minters.insert(p.clone());
        if added {
            tracing::info!(minter = %p, "minter added");
        }
        Ok(added)
    }

    pub fn remove_minter(
        &mut self,
        access: &AccessRegistry,
        caller: &Principal,
        p: &Principal,
    ) -> Result<bool, AccessError> {
        access.require_owner(caller)?;
        let removed = self.minters.remove(p);
        if removed {
            tracing::info!(minter = %p, "minter removed");
        }
        Ok(removed)
    }

    /// Explicit minters, sorted. Does not include the implicit owner entry.
    pub fn minters(&self) -> Vec<Principal> {
        sorted(&self.minters)
    }
}
