//! Lifecycle and pause state enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The minting phase of the token.
///
/// `Minting` is the initial state; `Finished` is terminal. The only legal
/// transition is `Minting -> Finished`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    /// Supply may be created; transfers between holders are disallowed.
    #[default]
    Minting,
    /// Supply is fixed (except for burns); transfers are allowed.
    Finished,
}

impl LifecyclePhase {
    /// Whether minting operations are currently allowed.
    pub fn allows_minting(&self) -> bool {
        matches!(self, Self::Minting)
    }

    /// Whether holder-to-holder transfers are allowed in this phase.
    pub fn allows_transfers(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minting => write!(f, "minting"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

/// The emergency-stop overlay, orthogonal to [`LifecyclePhase`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseState {
    #[default]
    Active,
    Paused,
}

impl PauseState {
    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused)
    }
}
