use thiserror::Error;

use wlt_types::{Principal, TokenAmount};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient balance for {account}: need {needed}, have {available}")]
    InsufficientBalance {
        account: Principal,
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("insufficient allowance for {spender} over {owner}: need {needed}, have {available}")]
    InsufficientAllowance {
        owner: Principal,
        spender: Principal,
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("arithmetic overflow: total supply or allowance would exceed the maximum amount")]
    SupplyOverflow,
}
