//! Owner, KYC admin and KYC-listed role sets.

use std::collections::HashSet;

use wlt_types::Principal;

use crate::error::AccessError;
use crate::role::Role;

/// Holds the owner and the two whitelist tiers.
///
/// The owner is never materialized in `kyc_admins`; [`is_kyc_admin`]
/// treats it as a member regardless, so removing it from the explicit set
/// cannot strip its rights.
///
/// Mutators return `Ok(true)` when membership changed and `Ok(false)` for
/// an idempotent no-op.
///
/// [`is_kyc_admin`]: AccessRegistry::is_kyc_admin
#[derive(Clone, Debug)]
pub struct AccessRegistry {
    owner: Principal,
    kyc_admins: HashSet<Principal>,
    kyc_listed: HashSet<Principal>,
}

impl AccessRegistry {
    pub fn new(owner: Principal) -> Self {
        Self {
            owner,
            kyc_admins: HashSet::new(),
            kyc_listed: HashSet::new(),
        }
    }

    pub fn owner(&self) -> &Principal {
        &self.owner
    }

    pub fn is_owner(&self, p: &Principal) -> bool {
        &self.owner == p
    }

    pub fn is_kyc_admin(&self, p: &Principal) -> bool {
        self.is_owner(p) || self.kyc_admins.contains(p)
    }

    pub fn is_kyc_listed(&self, p: &Principal) -> bool {
        self.kyc_listed.contains(p)
    }

    /// Fail with `Unauthorized` unless `caller` is the owner.
    pub fn require_owner(&self, caller: &Principal) -> Result<(), AccessError> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(AccessError::unauthorized(caller, Role::Owner))
        }
    }

    /// Fail with `Unauthorized` unless `caller` is the owner or a KYC admin.
    pub fn require_kyc_admin(&self, caller: &Principal) -> Result<(), AccessError> {
        if self.is_kyc_admin(caller) {
            Ok(())
        } else {
            Err(AccessError::unauthorized(caller, Role::KycAdmin))
        }
    }

    pub fn add_kyc_admin(&mut self, caller: &Principal, p: &Principal) -> Result<bool, AccessError> {
        self.require_owner(caller)?;
        let added = self.kyc_admins.insert(p.clone());
        if added {
            tracing::info!(admin = %p, "KYC admin added");
        }
        Ok(added)
    }

    pub fn remove_kyc_admin(
        &mut self,
        caller: &Principal,
        p: &Principal,
    ) -> Result<bool, AccessError> {
        self.require_owner(caller)?;
        let removed = self.kyc_admins.remove(p);
        if removed {
            tracing::info!(admin = %p, "KYC admin removed");
        }
        Ok(removed)
    }

    pub fn add_kyc_listed(&mut self, caller: &Principal, p: &Principal) -> Result<bool, AccessError> {
        self.require_kyc_admin(caller)?;
        Ok(self.list(p))
    }

    pub fn remove_kyc_listed(
        &mut self,
        caller: &Principal,
        p: &Principal,
    ) -> Result<bool, AccessError> {
        self.require_kyc_admin(caller)?;
        let removed = self.kyc_listed.remove(p);
        if removed {
            tracing::info!(investor = %p, by = %caller, "investor removed from whitelist");
        }
        Ok(removed)
    }

    /// Whitelist `p` without an authorization check.
    ///
    /// Only for callers that have already authorized the action themselves,
    /// such as approve-and-mint.
    pub fn list(&mut self, p: &Principal) -> bool {
        let added = self.kyc_listed.insert(p.clone());
        if added {
            tracing::info!(investor = %p, "investor whitelisted");
        }
        added
    }

    /// Hand ownership to `new_owner`, returning the previous owner.
    ///
    /// The implicit admin and minter rights move with it.
    pub fn transfer_ownership(
        &mut self,
        caller: &Principal,
        new_owner: &Principal,
    ) -> Result<Principal, AccessError> {
        self.require_owner(caller)?;
        let previous = std::mem::replace(&mut self.owner, new_owner.clone());
        tracing::info!(previous = %previous, new = %new_owner, "ownership transferred");
        Ok(previous)
    }

    /// Explicit KYC admins, sorted. Does not include the implicit owner entry.
    pub fn kyc_admins(&self) -> Vec<Principal> {
        sorted(&self.kyc_admins)
    }

    /// Whitelisted investors, sorted.
    pub fn kyc_listed(&self) -> Vec<Principal> {
        sorted(&self.kyc_listed)
    }
}

pub(crate) fn sorted(set: &HashSet<Principal>) -> Vec<Principal> {
    let mut out: Vec<Principal> = set.iter().cloned().collect();
    out.sort();
    out
}
