//! The balance table: balances, allowances and total supply.
//!
//! The ledger is pure bookkeeping and knows nothing about roles or phases.
//! Every mutating method validates all of its preconditions before it
//! writes anything, so an `Err` always leaves the ledger untouched.
//!
//! Invariant: the sum of all balances equals `total_supply`. Since every
//! balance is bounded by the supply, a credit can only overflow if the
//! supply itself would, which is checked up front on mint.

use std::collections::HashMap;

use wlt_types::{Principal, TokenAmount};

use crate::error::LedgerError;
use crate::snapshot::{BalanceEntry, LedgerSnapshot};

#[derive(Clone, Debug, Default)]
pub struct Ledger {
    balances: HashMap<Principal, TokenAmount>,
    /// (owner, spender) -> amount the spender may still move.
    allowances: HashMap<(Principal, Principal), TokenAmount>,
    total_supply: TokenAmount,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: &Principal) -> TokenAmount {
        self.balances.get(account).copied().unwrap_or(TokenAmount::ZERO)
    }

    pub fn allowance(&self, owner: &Principal, spender: &Principal) -> TokenAmount {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    // ── Precondition checks ────────────────────────────────────────────

    /// Fail with `InsufficientBalance` unless `account` holds at least `amount`.
    pub fn ensure_balance(&self, account: &Principal, amount: TokenAmount) -> Result<(), LedgerError> {
        let available = self.balance_of(account);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: account.clone(),
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    /// Fail with `InsufficientAllowance` unless `spender` may move `amount` of `owner`'s tokens.
    pub fn ensure_allowance(
        &self,
        owner: &Principal,
        spender: &Principal,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        let available = self.allowance(owner, spender);
        if available < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner: owner.clone(),
                spender: spender.clone(),
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    /// Supply after minting `amount`, or `SupplyOverflow`.
    pub fn supply_after_mint(&self, amount: TokenAmount) -> Result<TokenAmount, LedgerError> {
        self.total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow)
    }

    // ── Supply changes ─────────────────────────────────────────────────

    /// Create `amount` new tokens in `to`'s balance.
    pub fn mint(&mut self, to: &Principal, amount: TokenAmount) -> Result<(), LedgerError> {
        let new_supply = self.supply_after_mint(amount)?;
        self.total_supply = new_supply;
        self.credit(to, amount);
        Ok(())
    }

    /// Destroy `amount` tokens from `from`'s balance.
    pub fn burn(&mut self, from: &Principal, amount: TokenAmount) -> Result<(), LedgerError> {
        self.ensure_balance(from, amount)?;
        self.debit(from, amount);
        self.total_supply = self.total_supply.saturating_sub(amount);
        Ok(())
    }

    /// Burn `amount` of `owner`'s tokens on behalf of `spender`, consuming allowance.
    ///
    /// Returns the spender's remaining allowance.
    pub fn burn_from(
        &mut self,
        owner: &Principal,
        spender: &Principal,
        amount: TokenAmount,
    ) -> Result<TokenAmount, LedgerError> {
        self.ensure_allowance(owner, spender, amount)?;
        self.ensure_balance(owner, amount)?;
        let remaining = self.consume_allowance(owner, spender, amount);
        self.debit(owner, amount);
        self.total_supply = self.total_supply.saturating_sub(amount);
        Ok(remaining)
    }

    // ── Balance moves ──────────────────────────────────────────────────

    /// Move `amount` from `from` to `to`. A self-transfer still requires the balance.
    pub fn transfer(
        &mut self,
        from: &Principal,
        to: &Principal,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        self.ensure_balance(from, amount)?;
        self.debit(from, amount);
        self.credit(to, amount);
        Ok(())
    }

    /// Move `amount` from `owner` to `to` on behalf of `spender`.
    ///
    /// Returns the spender's remaining allowance.
    pub fn transfer_from(
        &mut self,
        owner: &Principal,
        spender: &Principal,
        to: &Principal,
        amount: TokenAmount,
    ) -> Result<TokenAmount, LedgerError> {
        self.ensure_allowance(owner, spender, amount)?;
        self.ensure_balance(owner, amount)?;
        let remaining = self.consume_allowance(owner, spender, amount);
        self.debit(owner, amount);
        self.credit(to, amount);
        Ok(remaining)
    }

    /// Move the entire balance of `from` to `to`, returning the amount moved.
    pub fn move_all(&mut self, from: &Principal, to: &Principal) -> TokenAmount {
        let amount = self.balance_of(from);
        self.debit(from, amount);
        self.credit(to, amount);
        amount
    }

    // ── Allowances ─────────────────────────────────────────────────────

    pub fn approve(&mut self, owner: &Principal, spender: &Principal, amount: TokenAmount) {
        self.allowances
            .insert((owner.clone(), spender.clone()), amount);
    }

    /// Returns the new allowance.
    pub fn increase_allowance(
        &mut self,
        owner: &Principal,
        spender: &Principal,
        added: TokenAmount,
    ) -> Result<TokenAmount, LedgerError> {
        let updated = self
            .allowance(owner, spender)
            .checked_add(added)
            .ok_or(LedgerError::SupplyOverflow)?;
        self.approve(owner, spender, updated);
        Ok(updated)
    }

    /// Returns the new allowance.
    pub fn decrease_allowance(
        &mut self,
        owner: &Principal,
        spender: &Principal,
        subtracted: TokenAmount,
    ) -> Result<TokenAmount, LedgerError> {
        self.ensure_allowance(owner, spender, subtracted)?;
        Ok(self.consume_allowance(owner, spender, subtracted))
    }

    // ── Snapshots ──────────────────────────────────────────────────────

    /// Check the supply invariant by summing every balance.
    pub fn supply_is_consistent(&self) -> bool {
        self.balances
            .values()
            .try_fold(TokenAmount::ZERO, |acc, b| acc.checked_add(*b))
            == Some(self.total_supply)
    }

    /// Capture all non-zero balances, sorted by principal.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let mut balances: Vec<BalanceEntry> = self
            .balances
            .iter()
            .filter(|(_, amount)| !amount.is_zero())
            .map(|(account, amount)| BalanceEntry {
                account: account.clone(),
                balance: *amount,
            })
            .collect();
        balances.sort_by(|a, b| a.account.cmp(&b.account));
        LedgerSnapshot::create(balances, self.total_supply)
    }

    // ── Unchecked primitives (callers validate first) ──────────────────

    fn credit(&mut self, account: &Principal, amount: TokenAmount) {
        let balance = self.balances.entry(account.clone()).or_default();
        // Bounded by total supply, which was checked on mint.
        *balance = *balance + amount;
    }

    fn debit(&mut self, account: &Principal, amount: TokenAmount) {
        if let Some(balance) = self.balances.get_mut(account) {
            *balance = balance.saturating_sub(amount);
        }
    }

    fn consume_allowance(
        &mut self,
        owner: &Principal,
        spender: &Principal,
        amount: TokenAmount,
    ) -> TokenAmount {
        let remaining = self.allowance(owner, spender).saturating_sub(amount);
        self.approve(owner, spender, remaining);
        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str) -> Principal {
        Principal::new(name)
    }

    fn amt(raw: u128) -> TokenAmount {
        TokenAmount::new(raw)
    }

    #[test]
    fn mint_credits_and_grows_supply() {
        let mut ledger = Ledger::new();
        ledger.mint(&p("alice"), amt(200)).unwrap();
        ledger.mint(&p("bob"), amt(100)).unwrap();

        assert_eq!(ledger.balance_of(&p("alice")), amt(200));
        assert_eq!(ledger.balance_of(&p("bob")), amt(100));
        assert_eq!(ledger.total_supply(), amt(300));
        assert!(ledger.supply_is_consistent());
    }

    #[test]
    fn mint_overflow_leaves_state_untouched() {
        let mut ledger = Ledger::new();
        ledger.mint(&p("alice"), TokenAmount::MAX).unwrap();
        let err = ledger.mint(&p("bob"), amt(1)).unwrap_err();
        assert!(matches!(err, LedgerError::SupplyOverflow));
        assert_eq!(ledger.balance_of(&p("bob")), TokenAmount::ZERO);
        assert_eq!(ledger.total_supply(), TokenAmount::MAX);
    }

    #[test]
    fn transfer_moves_balance() {
        let mut ledger = Ledger::new();
        ledger.mint(&p("alice"), amt(200)).unwrap();
        ledger.transfer(&p("alice"), &p("bob"), amt(50)).unwrap();
        assert_eq!(ledger.balance_of(&p("alice")), amt(150));
        assert_eq!(ledger.balance_of(&p("bob")), amt(50));
        assert!(ledger.supply_is_consistent());
    }

    #[test]
    fn self_transfer_keeps_balance_but_requires_funds() {
        let mut ledger = Ledger::new();
        ledger.mint(&p("alice"), amt(100)).unwrap();
        ledger.transfer(&p("alice"), &p("alice"), amt(100)).unwrap();
        assert_eq!(ledger.balance_of(&p("alice")), amt(100));

        let err = ledger.transfer(&p("alice"), &p("alice"), amt(101)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
    }

    #[test]
    fn transfer_from_checks_allowance_before_balance() {
        let mut ledger = Ledger::new();
        ledger.mint(&p("alice"), amt(10)).unwrap();
        ledger.approve(&p("alice"), &p("spender"), amt(5));

        let err = ledger
            .transfer_from(&p("alice"), &p("spender"), &p("bob"), amt(6))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));
        assert_eq!(ledger.allowance(&p("alice"), &p("spender")), amt(5));
        assert_eq!(ledger.balance_of(&p("alice")), amt(10));

        let remaining = ledger
            .transfer_from(&p("alice"), &p("spender"), &p("bob"), amt(4))
            .unwrap();
        assert_eq!(remaining, amt(1));
        assert_eq!(ledger.balance_of(&p("bob")), amt(4));
    }

    #[test]
    fn transfer_from_with_allowance_but_no_funds_keeps_allowance() {
        let mut ledger = Ledger::new();
        ledger.approve(&p("alice"), &p("spender"), amt(50));
        let err = ledger
            .transfer_from(&p("alice"), &p("spender"), &p("bob"), amt(10))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(ledger.allowance(&p("alice"), &p("spender")), amt(50));
    }

    #[test]
    fn burn_and_burn_from_shrink_supply() {
        let mut ledger = Ledger::new();
        ledger.mint(&p("owner"), amt(100)).unwrap();
        ledger.mint(&p("holder"), amt(100)).unwrap();

        ledger.burn(&p("owner"), amt(40)).unwrap();
        assert_eq!(ledger.total_supply(), amt(160));

        ledger.increase_allowance(&p("holder"), &p("owner"), amt(100)).unwrap();
        let remaining = ledger.burn_from(&p("holder"), &p("owner"), amt(100)).unwrap();
        assert_eq!(remaining, TokenAmount::ZERO);
        assert_eq!(ledger.balance_of(&p("holder")), TokenAmount::ZERO);
        assert_eq!(ledger.total_supply(), amt(60));
        assert!(ledger.supply_is_consistent());
    }

    #[test]
    fn decrease_allowance_below_zero_fails() {
        let mut ledger = Ledger::new();
        ledger.approve(&p("alice"), &p("bob"), amt(3));
        assert!(ledger.decrease_allowance(&p("alice"), &p("bob"), amt(4)).is_err());
        assert_eq!(ledger.decrease_allowance(&p("alice"), &p("bob"), amt(3)).unwrap(), amt(0));
    }

    #[test]
    fn move_all_empties_source() {
        let mut ledger = Ledger::new();
        ledger.mint(&p("lost"), amt(200)).unwrap();
        ledger.mint(&p("new"), amt(5)).unwrap();
        let moved = ledger.move_all(&p("lost"), &p("new"));
        assert_eq!(moved, amt(200));
        assert_eq!(ledger.balance_of(&p("lost")), TokenAmount::ZERO);
        assert_eq!(ledger.balance_of(&p("new")), amt(205));
    }

    #[test]
    fn snapshot_skips_zero_balances_and_sorts() {
        let mut ledger = Ledger::new();
        ledger.mint(&p("carol"), amt(1)).unwrap();
        ledger.mint(&p("alice"), amt(2)).unwrap();
        ledger.mint(&p("bob"), amt(3)).unwrap();
        ledger.burn(&p("bob"), amt(3)).unwrap();

        let snap = ledger.snapshot();
        let names: Vec<_> = snap.balances.iter().map(|e| e.account.as_str()).collect();
        assert_eq!(names, vec!["alice", "carol"]);
        assert_eq!(snap.total_supply, amt(3));
        assert!(snap.verify());
    }
}
