//! Role registries for the whitelist token.
//!
//! Roles are independent set-membership capabilities, not a hierarchy:
//! - **Owner**: exactly one principal; implicitly a KYC admin and a minter.
//! - **KYC admins**: may curate the whitelist.
//! - **KYC listed**: whitelisted investors, cleared to send and receive.
//! - **Minters**: may create supply while minting is open.
//!
//! Checks are plain predicates; the guard layer composes them per operation.

pub mod error;
pub mod minters;
pub mod registry;
pub mod role;

pub use error::AccessError;
pub use minters::MinterRegistry;
pub use registry::AccessRegistry;
pub use role::Role;
