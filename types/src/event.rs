//! Notification records emitted by successful token operations.
//!
//! Events are ordered: an operation that produces several records returns
//! them in the order they logically happened (e.g. `burn_from` yields the
//! debit `Transfer` before the allowance `Approval`).

use serde::{Deserialize, Serialize};

use crate::amount::TokenAmount;
use crate::principal::Principal;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TokenEvent {
    /// Balance moved. `from == None` is a mint, `to == None` is a burn.
    Transfer {
        from: Option<Principal>,
        to: Option<Principal>,
        amount: TokenAmount,
    },
    /// Allowance of `spender` over `owner`'s balance is now `amount`.
    Approval {
        owner: Principal,
        spender: Principal,
        amount: TokenAmount,
    },
    /// Minting phase closed for good.
    MintFinished,
    Paused {
        by: Principal,
    },
    Unpaused {
        by: Principal,
    },
    OwnershipTransferred {
        previous: Principal,
        new: Principal,
    },
    KycAdminAdded {
        account: Principal,
    },
    KycAdminRemoved {
        account: Principal,
    },
    KycListedAdded {
        account: Principal,
    },
    KycListedRemoved {
        account: Principal,
    },
    MinterAdded {
        account: Principal,
    },
    MinterRemoved {
        account: Principal,
    },
    /// Owner-driven recovery moved the full balance of `from` to `to`.
    TokensRestored {
        from: Principal,
        to: Principal,
        amount: TokenAmount,
    },
}

impl TokenEvent {
    /// Short name of the event kind, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "Transfer",
            Self::Approval { .. } => "Approval",
            Self::MintFinished => "MintFinished",
            Self::Paused { .. } => "Paused",
            Self::Unpaused { .. } => "Unpaused",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
            Self::KycAdminAdded { .. } => "KycAdminAdded",
            Self::KycAdminRemoved { .. } => "KycAdminRemoved",
            Self::KycListedAdded { .. } => "KycListedAdded",
            Self::KycListedRemoved { .. } => "KycListedRemoved",
            Self::MinterAdded { .. } => "MinterAdded",
            Self::MinterRemoved { .. } => "MinterRemoved",
            Self::TokensRestored { .. } => "TokensRestored",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_event_serializes_with_tag() {
        let event = TokenEvent::Transfer {
            from: None,
            to: Some(Principal::new("alice")),
            amount: TokenAmount::new(10),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "transfer");
        assert_eq!(json["to"], "alice");
        assert!(json["from"].is_null());
        assert_eq!(event.name(), "Transfer");
    }
}
