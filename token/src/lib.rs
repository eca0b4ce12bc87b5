//! The whitelist token service.
//!
//! [`TokenService`] composes the ledger, the role registries and the
//! lifecycle guard into atomic, fully checked operations. Every operation
//! checks the lifecycle first (phase, then pause), then the caller's roles,
//! then ledger preconditions, and only then mutates. A rejected call leaves
//! all state untouched and publishes nothing.
//!
//! [`SharedToken`] wraps the service for concurrent hosts: reads share a
//! lock, mutations are serialized.

pub mod config;
pub mod error;
pub mod events;
pub mod operation;
pub mod service;
pub mod shared;
pub mod snapshot;

pub use config::{GenesisBalance, GenesisConfig, TokenConfig};
pub use error::{ErrorKind, TokenError};
pub use events::EventBus;
pub use operation::Operation;
pub use service::TokenService;
pub use shared::SharedToken;
pub use snapshot::TokenSnapshot;
