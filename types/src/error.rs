//! Errors raised while constructing the shared types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid principal: {0:?}")]
    InvalidPrincipal(String),

    #[error("invalid token metadata: {0}")]
    InvalidMetadata(String),
}
