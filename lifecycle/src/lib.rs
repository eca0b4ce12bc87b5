//! Lifecycle guard for the whitelist token.
//!
//! Two orthogonal pieces of state:
//! - the minting phase, `Minting -> Finished`, one way and never reset;
//! - the pause overlay, `Active <-> Paused`, toggled by the owner.
//!
//! The guard only answers "is this class of operation allowed right now";
//! role checks for the caller come from `wlt-access`.

pub mod error;
pub mod guard;

pub use error::LifecycleError;
pub use guard::LifecycleGuard;
