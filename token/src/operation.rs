//! Serializable form of every mutating token operation.
//!
//! Scripts and property tests describe work as a list of `(caller,
//! Operation)` steps and feed them through [`TokenService::apply`].

use serde::{Deserialize, Serialize};

use wlt_types::{Principal, TokenAmount, TokenEvent};

use crate::error::TokenError;
use crate::service::TokenService;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    AddKycAdmin { account: Principal },
    RemoveKycAdmin { account: Principal },
    AddKycListed { account: Principal },
    RemoveKycListed { account: Principal },
    AddMinter { account: Principal },
    RemoveMinter { account: Principal },
    TransferOwnership { new_owner: Principal },
    Mint { to: Principal, amount: TokenAmount },
    ApproveAndMint { investor: Principal, amount: TokenAmount },
    FinishMinting,
    Pause,
    Unpause,
    Transfer { to: Principal, amount: TokenAmount },
    TransferFrom { from: Principal, to: Principal, amount: TokenAmount },
    Approve { spender: Principal, amount: TokenAmount },
    IncreaseAllowance { spender: Principal, amount: TokenAmount },
    DecreaseAllowance { spender: Principal, amount: TokenAmount },
    Burn { amount: TokenAmount },
    BurnFrom { from: Principal, amount: TokenAmount },
    RestoreTokens { from: Principal, to: Principal },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddKycAdmin { .. } => "add_kyc_admin",
            Self::RemoveKycAdmin { .. } => "remove_kyc_admin",
            Self::AddKycListed { .. } => "add_kyc_listed",
            Self::RemoveKycListed { .. } => "remove_kyc_listed",
            Self::AddMinter { .. } => "add_minter",
            Self::RemoveMinter { .. } => "remove_minter",
            Self::TransferOwnership { .. } => "transfer_ownership",
            Self::Mint { .. } => "mint",
            Self::ApproveAndMint { .. } => "approve_and_mint",
            Self::FinishMinting => "finish_minting",
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::Transfer { .. } => "transfer",
            Self::TransferFrom { .. } => "transfer_from",
            Self::Approve { .. } => "approve",
            Self::IncreaseAllowance { .. } => "increase_allowance",
            Self::DecreaseAllowance { .. } => "decrease_allowance",
            Self::Burn { .. } => "burn",
            Self::BurnFrom { .. } => "burn_from",
            Self::RestoreTokens { .. } => "restore_tokens",
        }
    }

    /// Every principal the operation names, excluding the caller.
    pub fn principals(&self) -> Vec<&Principal> {
        match self {
            Self::AddKycAdmin { account }
            | Self::RemoveKycAdmin { account }
            | Self::AddKycListed { account }
            | Self::RemoveKycListed { account }
            | Self::AddMinter { account }
            | Self::RemoveMinter { account } => vec![account],
            Self::TransferOwnership { new_owner } => vec![new_owner],
            Self::Mint { to, .. } | Self::Transfer { to, .. } => vec![to],
            Self::ApproveAndMint { investor, .. } => vec![investor],
            Self::Approve { spender, .. }
            | Self::IncreaseAllowance { spender, .. }
            | Self::DecreaseAllowance { spender, .. } => vec![spender],
            Self::BurnFrom { from, .. } => vec![from],
            Self::TransferFrom { from, to, .. } | Self::RestoreTokens { from, to } => vec![from, to],
            Self::FinishMinting | Self::Pause | Self::Unpause | Self::Burn { .. } => Vec::new(),
        }
    }
}

impl TokenService {
    /// Dispatch `op` on behalf of `caller`.
    pub fn apply(&mut self, caller: &Principal, op: &Operation) -> Result<Vec<TokenEvent>, TokenError> {
        match op {
            Operation::AddKycAdmin { account } => self.add_kyc_admin(caller, account),
            Operation::RemoveKycAdmin { account } => self.remove_kyc_admin(caller, account),
            Operation::AddKycListed { account } => self.add_kyc_listed(caller, account),
            Operation::RemoveKycListed { account } => self.remove_kyc_listed(caller, account),
            Operation::AddMinter { account } => self.add_minter(caller, account),
            Operation::RemoveMinter { account } => self.remove_minter(caller, account),
            Operation::TransferOwnership { new_owner } => self.transfer_ownership(caller, new_owner),
            Operation::Mint { to, amount } => self.mint(caller, to, *amount),
            Operation::ApproveAndMint { investor, amount } => {
                self.approve_and_mint(caller, investor, *amount)
            }
            Operation::FinishMinting => self.finish_minting(caller),
            Operation::Pause => self.pause(caller),
            Operation::Unpause => self.unpause(caller),
            Operation::Transfer { to, amount } => self.transfer(caller, to, *amount),
            Operation::TransferFrom { from, to, amount } => {
                self.transfer_from(caller, from, to, *amount)
            }
            Operation::Approve { spender, amount } => self.approve(caller, spender, *amount),
            Operation::IncreaseAllowance { spender, amount } => {
                self.increase_allowance(caller, spender, *amount)
            }
            Operation::DecreaseAllowance { spender, amount } => {
                self.decrease_allowance(caller, spender, *amount)
            }
            Operation::Burn { amount } => self.burn(caller, *amount),
            Operation::BurnFrom { from, amount } => self.burn_from(caller, from, *amount),
            Operation::RestoreTokens { from, to } => self.restore_tokens(caller, from, to),
        }
    }
}
