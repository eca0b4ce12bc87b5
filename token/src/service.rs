//! Orchestration of the guard layer over the ledger.

use wlt_access::{AccessRegistry, MinterRegistry};
use wlt_ledger::Ledger;
use wlt_lifecycle::LifecycleGuard;
use wlt_types::{LifecyclePhase, Principal, TokenAmount, TokenEvent, TokenMetadata};

use crate::config::TokenConfig;
use crate::error::TokenError;
use crate::events::EventBus;
use crate::snapshot::TokenSnapshot;

type OpResult = Result<Vec<TokenEvent>, TokenError>;

/// A whitelist token: one ledger, its role registries and its lifecycle.
///
/// All authority state lives in this value; nothing is global. Mutations
/// take `&mut self` and return the events they produced, in order. The
/// same events are published to every [`EventBus`] subscriber.
pub struct TokenService {
    metadata: TokenMetadata,
    ledger: Ledger,
    access: AccessRegistry,
    minters: MinterRegistry,
    lifecycle: LifecycleGuard,
    events: EventBus,
}

impl TokenService {
    /// Create a token owned by `owner`, in the minting phase and unpaused.
    pub fn new(owner: Principal, metadata: TokenMetadata) -> Self {
        tracing::info!(owner = %owner, symbol = %metadata.symbol, "token created");
        Self {
            metadata,
            ledger: Ledger::new(),
            access: AccessRegistry::new(owner),
            minters: MinterRegistry::new(),
            lifecycle: LifecycleGuard::new(),
            events: EventBus::new(),
        }
    }

    /// Build a token from configuration, applying the genesis table as the owner.
    pub fn from_config(config: &TokenConfig) -> Result<Self, TokenError> {
        config.validate()?;
        let owner = config.owner.clone();
        let mut token = Self::new(owner.clone(), config.metadata());

        let genesis = &config.genesis;
        for admin in &genesis.kyc_admins {
            token.add_kyc_admin(&owner, admin)?;
        }
        for minter in &genesis.minters {
            token.add_minter(&owner, minter)?;
        }
        for investor in &genesis.kyc_listed {
            token.add_kyc_listed(&owner, investor)?;
        }
        for entry in &genesis.balances {
            token.mint(&owner, &entry.account, entry.amount)?;
        }
        if genesis.finish_minting {
            token.finish_minting(&owner)?;
        }
        tracing::info!(
            accounts = genesis.balances.len(),
            supply = %token.total_supply(),
            "genesis applied"
        );
        Ok(token)
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&TokenEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn owner(&self) -> &Principal {
        self.access.owner()
    }

    pub fn is_owner(&self, p: &Principal) -> bool {
        self.access.is_owner(p)
    }

    pub fn is_kyc_admin(&self, p: &Principal) -> bool {
        self.access.is_kyc_admin(p)
    }

    pub fn is_kyc_listed(&self, p: &Principal) -> bool {
        self.access.is_kyc_listed(p)
    }

    pub fn is_minter(&self, p: &Principal) -> bool {
        self.minters.is_minter(&self.access, p)
    }

    /// Whether `p` may receive tokens in a post-minting transfer.
    pub fn can_buy(&self, p: &Principal) -> bool {
        self.access.is_kyc_listed(p)
    }

    /// Whether `p` may send tokens in a post-minting transfer.
    pub fn can_sell(&self, p: &Principal) -> bool {
        self.access.is_kyc_listed(p)
    }

    pub fn minting_finished(&self) -> bool {
        self.lifecycle.minting_finished()
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.lifecycle.phase()
    }

    pub fn paused(&self) -> bool {
        self.lifecycle.is_paused()
    }

    pub fn balance_of(&self, p: &Principal) -> TokenAmount {
        self.ledger.balance_of(p)
    }

    pub fn allowance(&self, owner: &Principal, spender: &Principal) -> TokenAmount {
        self.ledger.allowance(owner, spender)
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.ledger.total_supply()
    }

    pub fn supply_is_consistent(&self) -> bool {
        self.ledger.supply_is_consistent()
    }

    pub fn snapshot(&self) -> TokenSnapshot {
        TokenSnapshot {
            metadata: self.metadata.clone(),
            owner: self.access.owner().clone(),
            phase: self.lifecycle.phase(),
            pause: self.lifecycle.pause_state(),
            total_supply: self.ledger.total_supply(),
            kyc_admins: self.access.kyc_admins(),
            kyc_listed: self.access.kyc_listed(),
            minters: self.minters.minters(),
            ledger: self.ledger.snapshot(),
        }
    }

    // ── Role administration ────────────────────────────────────────────

    pub fn add_kyc_admin(&mut self, caller: &Principal, account: &Principal) -> OpResult {
        self.run("add_kyc_admin", caller, |token| {
            let added = token.access.add_kyc_admin(caller, account)?;
            Ok(changed(added, || TokenEvent::KycAdminAdded {
                account: account.clone(),
            }))
        })
    }

    pub fn remove_kyc_admin(&mut self, caller: &Principal, account: &Principal) -> OpResult {
        self.run("remove_kyc_admin", caller, |token| {
            let removed = token.access.remove_kyc_admin(caller, account)?;
            Ok(changed(removed, || TokenEvent::KycAdminRemoved {
                account: account.clone(),
            }))
        })
    }

    pub fn add_kyc_listed(&mut self, caller: &Principal, account: &Principal) -> OpResult {
        self.run("add_kyc_listed", caller, |token| {
            let added = token.access.add_kyc_listed(caller, account)?;
            Ok(changed(added, || TokenEvent::KycListedAdded {
                account: account.clone(),
            }))
        })
    }

    pub fn remove_kyc_listed(&mut self, caller: &Principal, account: &Principal) -> OpResult {
        self.run("remove_kyc_listed", caller, |token| {
            let removed = token.access.remove_kyc_listed(caller, account)?;
            Ok(changed(removed, || TokenEvent::KycListedRemoved {
                account: account.clone(),
            }))
        })
    }

    pub fn add_minter(&mut self, caller: &Principal, account: &Principal) -> OpResult {
        self.run("add_minter", caller, |token| {
            let added = token.minters.add_minter(&token.access, caller, account)?;
            Ok(changed(added, || TokenEvent::MinterAdded {
                account: account.clone(),
            }))
        })
    }

    pub fn remove_minter(&mut self, caller: &Principal, account: &Principal) -> OpResult {
        self.run("remove_minter", caller, |token| {
            let removed = token.minters.remove_minter(&token.access, caller, account)?;
            Ok(changed(removed, || TokenEvent::MinterRemoved {
                account: account.clone(),
            }))
        })
    }

    pub fn transfer_ownership(&mut self, caller: &Principal, new_owner: &Principal) -> OpResult {
        self.run("transfer_ownership", caller, |token| {
            let previous = token.access.transfer_ownership(caller, new_owner)?;
            Ok(vec![TokenEvent::OwnershipTransferred {
                previous,
                new: new_owner.clone(),
            }])
        })
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    /// Close minting permanently. Emits exactly one `MintFinished`.
    pub fn finish_minting(&mut self, caller: &Principal) -> OpResult {
        self.run("finish_minting", caller, |token| {
            token.lifecycle.finish_minting(&token.access, caller)?;
            Ok(vec![TokenEvent::MintFinished])
        })
    }

    pub fn pause(&mut self, caller: &Principal) -> OpResult {
        self.run("pause", caller, |token| {
            token.lifecycle.pause(&token.access, caller)?;
            Ok(vec![TokenEvent::Paused { by: caller.clone() }])
        })
    }

    pub fn unpause(&mut self, caller: &Principal) -> OpResult {
        self.run("unpause", caller, |token| {
            token.lifecycle.unpause(&token.access, caller)?;
            Ok(vec![TokenEvent::Unpaused { by: caller.clone() }])
        })
    }

    // ── Supply creation ────────────────────────────────────────────────

    /// Create `amount` tokens for `to`. Not pause-gated and not whitelist-gated.
    pub fn mint(&mut self, caller: &Principal, to: &Principal, amount: TokenAmount) -> OpResult {
        self.run("mint", caller, |token| {
            token.lifecycle.require_minting_open()?;
            token.minters.require_minter(&token.access, caller)?;
            token.check_cap(amount)?;
            token.ledger.mint(to, amount)?;
            tracing::info!(minter = %caller, to = %to, %amount, "tokens minted");
            Ok(vec![TokenEvent::Transfer {
                from: None,
                to: Some(to.clone()),
                amount,
            }])
        })
    }

    /// Mint to `investor` and whitelist it in one step.
    ///
    /// The caller must be both a minter and a KYC admin.
    pub fn approve_and_mint(
        &mut self,
        caller: &Principal,
        investor: &Principal,
        amount: TokenAmount,
    ) -> OpResult {
        self.run("approve_and_mint", caller, |token| {
            token.lifecycle.require_minting_open()?;
            token.minters.require_minter(&token.access, caller)?;
            token.access.require_kyc_admin(caller)?;
            token.check_cap(amount)?;
            token.ledger.mint(investor, amount)?;
            let mut events = vec![TokenEvent::Transfer {
                from: None,
                to: Some(investor.clone()),
                amount,
            }];
            if token.access.list(investor) {
                events.push(TokenEvent::KycListedAdded {
                    account: investor.clone(),
                });
            }
            tracing::info!(minter = %caller, investor = %investor, %amount, "investor approved and minted");
            Ok(events)
        })
    }

    // ── Transfers ──────────────────────────────────────────────────────

    pub fn transfer(&mut self, caller: &Principal, to: &Principal, amount: TokenAmount) -> OpResult {
        self.run("transfer", caller, |token| {
            token.lifecycle.require_transfers_open()?;
            token.require_whitelisted(caller, to)?;
            token.ledger.transfer(caller, to, amount)?;
            tracing::info!(from = %caller, to = %to, %amount, "transfer");
            Ok(vec![TokenEvent::Transfer {
                from: Some(caller.clone()),
                to: Some(to.clone()),
                amount,
            }])
        })
    }

    /// Move `from`'s tokens to `to` using the caller's allowance.
    ///
    /// Whitelisting is checked on `from` and `to`, not on the caller.
    pub fn transfer_from(
        &mut self,
        caller: &Principal,
        from: &Principal,
        to: &Principal,
        amount: TokenAmount,
    ) -> OpResult {
        self.run("transfer_from", caller, |token| {
            token.lifecycle.require_transfers_open()?;
            token.require_whitelisted(from, to)?;
            let remaining = token.ledger.transfer_from(from, caller, to, amount)?;
            tracing::info!(spender = %caller, from = %from, to = %to, %amount, "delegated transfer");
            Ok(vec![
                TokenEvent::Transfer {
                    from: Some(from.clone()),
                    to: Some(to.clone()),
                    amount,
                },
                TokenEvent::Approval {
                    owner: from.clone(),
                    spender: caller.clone(),
                    amount: remaining,
                },
            ])
        })
    }

    // ── Allowances (ungated by lifecycle and pause) ────────────────────

    pub fn approve(&mut self, caller: &Principal, spender: &Principal, amount: TokenAmount) -> OpResult {
        self.run("approve", caller, |token| {
            token.ledger.approve(caller, spender, amount);
            Ok(vec![approval(caller, spender, amount)])
        })
    }

    pub fn increase_allowance(
        &mut self,
        caller: &Principal,
        spender: &Principal,
        added: TokenAmount,
    ) -> OpResult {
        self.run("increase_allowance", caller, |token| {
            let updated = token.ledger.increase_allowance(caller, spender, added)?;
            Ok(vec![approval(caller, spender, updated)])
        })
    }

    pub fn decrease_allowance(
        &mut self,
        caller: &Principal,
        spender: &Principal,
        subtracted: TokenAmount,
    ) -> OpResult {
        self.run("decrease_allowance", caller, |token| {
            let updated = token.ledger.decrease_allowance(caller, spender, subtracted)?;
            Ok(vec![approval(caller, spender, updated)])
        })
    }

    // ── Burns (owner only) ─────────────────────────────────────────────

    /// Burn from the owner's own balance. Emits exactly one `Transfer`.
    pub fn burn(&mut self, caller: &Principal, amount: TokenAmount) -> OpResult {
        self.run("burn", caller, |token| {
            token.access.require_owner(caller)?;
            token.ledger.burn(caller, amount)?;
            tracing::info!(from = %caller, %amount, "tokens burned");
            Ok(vec![TokenEvent::Transfer {
                from: Some(caller.clone()),
                to: None,
                amount,
            }])
        })
    }

    /// Burn `from`'s tokens using the owner's allowance. Emits `Transfer` then `Approval`.
    pub fn burn_from(&mut self, caller: &Principal, from: &Principal, amount: TokenAmount) -> OpResult {
        self.run("burn_from", caller, |token| {
            token.access.require_owner(caller)?;
            let remaining = token.ledger.burn_from(from, caller, amount)?;
            tracing::info!(by = %caller, from = %from, %amount, "tokens burned from holder");
            Ok(vec![
                TokenEvent::Transfer {
                    from: Some(from.clone()),
                    to: None,
                    amount,
                },
                approval(from, caller, remaining),
            ])
        })
    }

    // ── Recovery ───────────────────────────────────────────────────────

    /// Move the whole balance of `from` to `to`. Owner only, pause-gated.
    ///
    /// `to` need not be whitelisted and the phase does not matter.
    /// Allowances granted by or to `from` stay where they are.
    pub fn restore_tokens(&mut self, caller: &Principal, from: &Principal, to: &Principal) -> OpResult {
        self.run("restore_tokens", caller, |token| {
            token.lifecycle.require_active()?;
            token.access.require_owner(caller)?;
            let amount = token.ledger.move_all(from, to);
            tracing::warn!(by = %caller, from = %from, to = %to, %amount, "tokens restored");
            Ok(vec![
                TokenEvent::Transfer {
                    from: Some(from.clone()),
                    to: Some(to.clone()),
                    amount,
                },
                TokenEvent::TokensRestored {
                    from: from.clone(),
                    to: to.clone(),
                    amount,
                },
            ])
        })
    }

    // ── Internals ──────────────────────────────────────────────────────

    /// Run one operation, publishing its events on success.
    ///
    /// `f` must do all of its validation before its first mutation.
    fn run<F>(&mut self, op: &'static str, caller: &Principal, f: F) -> OpResult
    where
        F: FnOnce(&mut Self) -> OpResult,
    {
        match f(self) {
            Ok(events) => {
                tracing::debug!(op, caller = %caller, events = events.len(), "operation applied");
                self.events.publish(&events);
                Ok(events)
            }
            Err(err) => {
                tracing::debug!(op, caller = %caller, error = %err, "operation rejected");
                Err(err)
            }
        }
    }

    fn check_cap(&self, amount: TokenAmount) -> Result<(), TokenError> {
        let supply_after = self.ledger.supply_after_mint(amount)?;
        match self.metadata.cap {
            Some(cap) if supply_after > cap => Err(TokenError::CapExceeded { cap, supply_after }),
            _ => Ok(()),
        }
    }

    fn require_whitelisted(&self, seller: &Principal, buyer: &Principal) -> Result<(), TokenError> {
        if !self.can_sell(seller) {
            return Err(TokenError::NotWhitelisted {
                account: seller.clone(),
            });
        }
        if !self.can_buy(buyer) {
            return Err(TokenError::NotWhitelisted {
                account: buyer.clone(),
            });
        }
        Ok(())
    }
}

fn changed(did_change: bool, event: impl FnOnce() -> TokenEvent) -> Vec<TokenEvent> {
    if did_change {
        vec![event()]
    } else {
        Vec::new()
    }
}

fn approval(owner: &Principal, spender: &Principal, amount: TokenAmount) -> TokenEvent {
    TokenEvent::Approval {
        owner: owner.clone(),
        spender: spender.clone(),
        amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn p(name: &str) -> Principal {
        Principal::new(name)
    }

    fn amt(raw: u128) -> TokenAmount {
        TokenAmount::new(raw)
    }

    fn token() -> TokenService {
        TokenService::new(p("owner"), TokenMetadata::default())
    }

    #[test]
    fn mint_checks_phase_before_role() {
        let mut t = token();
        t.finish_minting(&p("owner")).unwrap();
        let err = t.mint(&p("stranger"), &p("a"), amt(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MintingClosed);
    }

    #[test]
    fn cap_is_enforced_atomically() {
        let mut t = TokenService::new(p("owner"), TokenMetadata::default().with_cap(amt(100)));
        t.mint(&p("owner"), &p("a"), amt(60)).unwrap();
        let err = t.mint(&p("owner"), &p("b"), amt(41)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapExceeded);
        assert_eq!(t.balance_of(&p("b")), TokenAmount::ZERO);
        assert_eq!(t.total_supply(), amt(60));

        t.mint(&p("owner"), &p("b"), amt(40)).unwrap();
        assert_eq!(t.total_supply(), amt(100));
    }

    #[test]
    fn idempotent_role_changes_emit_nothing() {
        let mut t = token();
        assert_eq!(t.add_kyc_listed(&p("owner"), &p("a")).unwrap().len(), 1);
        assert!(t.add_kyc_listed(&p("owner"), &p("a")).unwrap().is_empty());
        assert!(t.remove_minter(&p("owner"), &p("nobody")).unwrap().is_empty());
    }

    #[test]
    fn restore_tokens_checks_pause_before_role() {
        let mut t = token();
        t.pause(&p("owner")).unwrap();
        let err = t.restore_tokens(&p("stranger"), &p("a"), &p("b")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ContractPaused);
    }

    #[test]
    fn transfer_from_reports_the_unlisted_party() {
        let mut t = token();
        t.add_kyc_listed(&p("owner"), &p("a")).unwrap();
        t.mint(&p("owner"), &p("a"), amt(10)).unwrap();
        t.finish_minting(&p("owner")).unwrap();
        t.approve(&p("a"), &p("spender"), amt(10)).unwrap();

        match t.transfer_from(&p("spender"), &p("a"), &p("b"), amt(1)) {
            Err(TokenError::NotWhitelisted { account }) => assert_eq!(account, p("b")),
            other => panic!("expected NotWhitelisted, got {other:?}"),
        }
    }

    #[test]
    fn snapshot_reflects_roles_and_balances() {
        let mut t = token();
        t.add_minter(&p("owner"), &p("m")).unwrap();
        t.add_kyc_admin(&p("owner"), &p("k")).unwrap();
        t.mint(&p("m"), &p("a"), amt(5)).unwrap();
        t.pause(&p("owner")).unwrap();

        let snap = t.snapshot();
        assert_eq!(snap.owner, p("owner"));
        assert_eq!(snap.minters, vec![p("m")]);
        assert_eq!(snap.kyc_admins, vec![p("k")]);
        assert_eq!(snap.total_supply, amt(5));
        assert!(snap.pause.is_paused());
        assert_eq!(snap.ledger.balance_of(&p("a")), amt(5));
    }

    fn genesis_config() -> TokenConfig {
        use crate::config::{GenesisBalance, GenesisConfig};

        TokenConfig {
            owner: p("issuer"),
            cap: Some(amt(1_000)),
            genesis: GenesisConfig {
                kyc_admins: vec![p("kyc")],
                minters: vec![p("desk")],
                kyc_listed: vec![p("alice"), p("bob")],
                balances: vec![
                    GenesisBalance {
                        account: p("alice"),
                        amount: amt(600),
                    },
                    GenesisBalance {
                        account: p("bob"),
                        amount: amt(400),
                    },
                ],
                finish_minting: false,
            },
            ..TokenConfig::default()
        }
    }

    #[test]
    fn from_config_seeds_roles_and_balances() {
        let t = TokenService::from_config(&genesis_config()).unwrap();
        assert!(t.is_owner(&p("issuer")));
        assert!(t.is_kyc_admin(&p("kyc")));
        assert!(t.is_minter(&p("desk")));
        assert!(t.is_kyc_listed(&p("alice")));
        assert!(t.is_kyc_listed(&p("bob")));
        assert_eq!(t.balance_of(&p("alice")), amt(600));
        assert_eq!(t.balance_of(&p("bob")), amt(400));
        assert_eq!(t.total_supply(), amt(1_000));
        assert!(!t.minting_finished());
    }

    #[test]
    fn from_config_counts_genesis_balances_against_the_cap() {
        let mut config = genesis_config();
        config.cap = Some(amt(999));
        let err = TokenService::from_config(&config).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::CapExceeded);
    }

    #[test]
    fn from_config_can_close_minting() {
        let mut config = genesis_config();
        config.genesis.finish_minting = true;
        let mut t = TokenService::from_config(&config).unwrap();
        assert!(t.minting_finished());

        let err = t.mint(&p("issuer"), &p("alice"), amt(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MintingClosed);

        // Balances are live: listed holders can trade straight away.
        t.transfer(&p("alice"), &p("bob"), amt(100)).unwrap();
        assert_eq!(t.balance_of(&p("bob")), amt(500));
    }
}
