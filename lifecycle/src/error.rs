use thiserror::Error;

use wlt_access::AccessError;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Unauthorized(#[from] AccessError),

    #[error("minting has already been finished")]
    AlreadyFinished,

    #[error("minting is closed")]
    MintingClosed,

    #[error("minting has not been finished yet")]
    MintingNotFinished,

    #[error("token is paused")]
    ContractPaused,

    #[error("token is already paused")]
    AlreadyPaused,

    #[error("token is not paused")]
    NotPaused,
}
