use serde::{Deserialize, Serialize};
use std::fmt;

/// A capability an operation may require of its caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    KycAdmin,
    Minter,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::KycAdmin => write!(f, "KYC admin"),
            Self::Minter => write!(f, "minter"),
        }
    }
}
