//! Point-in-time view of the whole token.

use serde::{Deserialize, Serialize};

use wlt_ledger::LedgerSnapshot;
use wlt_types::{LifecyclePhase, PauseState, Principal, TokenAmount, TokenMetadata};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenSnapshot {
    pub metadata: TokenMetadata,
    pub owner: Principal,
    pub phase: LifecyclePhase,
    pub pause: PauseState,
    pub total_supply: TokenAmount,
    /// Explicit KYC admins; the owner is implicit and not listed.
    pub kyc_admins: Vec<Principal>,
    pub kyc_listed: Vec<Principal>,
    /// Explicit minters; the owner is implicit and not listed.
    pub minters: Vec<Principal>,
    pub ledger: LedgerSnapshot,
}
