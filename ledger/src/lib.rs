//! Balance bookkeeping for the whitelist token.
//!
//! A single mutable table of balances and allowances plus the running total
//! supply. No policy lives here: roles, phases and pausing are enforced by
//! the token service before it calls into the ledger.

pub mod error;
pub mod ledger;
pub mod snapshot;

pub use error::LedgerError;
pub use ledger::Ledger;
pub use snapshot::{BalanceEntry, LedgerSnapshot};
