//! Nullable infrastructure for deterministic testing.
//!
//! Nothing here touches the filesystem, the clock or randomness:
//! - [`TestAccounts`] hands out stable, named principals;
//! - [`EventRecorder`] captures every published event for later assertions.
//!
//! Usage: subscribe a recorder's listener to the token under test and build
//! callers from a `TestAccounts` set.

pub mod accounts;
pub mod events;

pub use accounts::TestAccounts;
pub use events::EventRecorder;
