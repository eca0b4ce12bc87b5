//! Ledger snapshots: capture every balance at a point in time.
//!
//! The snapshot digest is computed deterministically from the sorted
//! balances and the total supply, so two replays of the same operations
//! can be compared by digest alone.

use serde::{Deserialize, Serialize};

use wlt_types::{Principal, TokenAmount};

/// A single account's balance in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub account: Principal,
    pub balance: TokenAmount,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Blake2b-256 digest of the balances and supply, hex encoded.
    pub digest: String,
    pub total_supply: TokenAmount,
    /// Non-zero balances sorted by account.
    pub balances: Vec<BalanceEntry>,
}

impl LedgerSnapshot {
    pub fn create(balances: Vec<BalanceEntry>, total_supply: TokenAmount) -> Self {
        let mut snap = Self {
            digest: String::new(),
            total_supply,
            balances,
        };
        snap.digest = snap.compute_digest();
        snap
    }

    fn compute_digest(&self) -> String {
        use blake2::digest::consts::U32;
        use blake2::{Blake2b, Digest};

        let mut hasher = Blake2b::<U32>::new();
        for entry in &self.balances {
            let account = entry.account.as_str().as_bytes();
            hasher.update((account.len() as u64).to_le_bytes());
            hasher.update(account);
            hasher.update(entry.balance.raw().to_le_bytes());
        }
        hasher.update(self.total_supply.raw().to_le_bytes());
        hex::encode(hasher.finalize())
    }

    /// Verify the digest matches the balance data.
    pub fn verify(&self) -> bool {
        self.digest == self.compute_digest()
    }

    pub fn balance_of(&self, account: &Principal) -> TokenAmount {
        self.balances
            .iter()
            .find(|e| &e.account == account)
            .map_or(TokenAmount::ZERO, |e| e.balance)
    }
}
