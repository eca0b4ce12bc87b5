use std::fmt;

use thiserror::Error;

use wlt_access::AccessError;
use wlt_ledger::LedgerError;
use wlt_lifecycle::LifecycleError;
use wlt_types::{Principal, TokenAmount, TypesError};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("access error: {0}")]
    Access(#[from] AccessError),

    #[error("lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("{account} is not KYC listed")]
    NotWhitelisted { account: Principal },

    #[error("minting would raise supply to {supply_after}, above the cap of {cap}")]
    CapExceeded {
        cap: TokenAmount,
        supply_after: TokenAmount,
    },

    #[error("invalid input: {0}")]
    Types(#[from] TypesError),

    #[error("config error: {0}")]
    Config(String),
}

/// Flat classification of a [`TokenError`], independent of which layer raised it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    MintingClosed,
    MintingNotFinished,
    AlreadyFinished,
    ContractPaused,
    AlreadyPaused,
    NotPaused,
    InsufficientBalance,
    InsufficientAllowance,
    NotWhitelisted,
    CapExceeded,
    SupplyOverflow,
    InvalidInput,
}

impl ErrorKind {
    /// Stable snake_case name, as used in replay scripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::MintingClosed => "minting_closed",
            Self::MintingNotFinished => "minting_not_finished",
            Self::AlreadyFinished => "already_finished",
            Self::ContractPaused => "contract_paused",
            Self::AlreadyPaused => "already_paused",
            Self::NotPaused => "not_paused",
            Self::InsufficientBalance => "insufficient_balance",
            Self::InsufficientAllowance => "insufficient_allowance",
            Self::NotWhitelisted => "not_whitelisted",
            Self::CapExceeded => "cap_exceeded",
            Self::SupplyOverflow => "supply_overflow",
            Self::InvalidInput => "invalid_input",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Ledger(LedgerError::InsufficientBalance { .. }) => ErrorKind::InsufficientBalance,
            Self::Ledger(LedgerError::InsufficientAllowance { .. }) => {
                ErrorKind::InsufficientAllowance
            }
            Self::Ledger(LedgerError::SupplyOverflow) => ErrorKind::SupplyOverflow,
            Self::Access(AccessError::Unauthorized { .. }) => ErrorKind::Unauthorized,
            Self::Lifecycle(err) => match err {
                LifecycleError::Unauthorized(_) => ErrorKind::Unauthorized,
                LifecycleError::AlreadyFinished => ErrorKind::AlreadyFinished,
                LifecycleError::MintingClosed => ErrorKind::MintingClosed,
                LifecycleError::MintingNotFinished => ErrorKind::MintingNotFinished,
                LifecycleError::ContractPaused => ErrorKind::ContractPaused,
                LifecycleError::AlreadyPaused => ErrorKind::AlreadyPaused,
                LifecycleError::NotPaused => ErrorKind::NotPaused,
            },
            Self::NotWhitelisted { .. } => ErrorKind::NotWhitelisted,
            Self::CapExceeded { .. } => ErrorKind::CapExceeded,
            Self::Types(_) | Self::Config(_) => ErrorKind::InvalidInput,
        }
    }
}
