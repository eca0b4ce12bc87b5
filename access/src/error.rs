use thiserror::Error;

use wlt_types::Principal;

use crate::role::Role;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("{caller} is not authorized: requires {required} role")]
    Unauthorized { caller: Principal, required: Role },
}

impl AccessError {
    pub fn unauthorized(caller: &Principal, required: Role) -> Self {
        Self::Unauthorized {
            caller: caller.clone(),
            required,
        }
    }
}
