//! Fundamental types for the whitelist token workspace.
//!
//! Every other crate builds on these: principals, amounts, metadata, the
//! lifecycle/pause state enums and the event records observers consume.

pub mod amount;
pub mod error;
pub mod event;
pub mod metadata;
pub mod principal;
pub mod state;

pub use amount::TokenAmount;
pub use error::TypesError;
pub use event::TokenEvent;
pub use metadata::TokenMetadata;
pub use principal::Principal;
pub use state::{LifecyclePhase, PauseState};
