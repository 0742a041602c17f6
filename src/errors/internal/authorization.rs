use thiserror::Error;

use super::TokenError;
use crate::types::internal::authorization::GuardStage;

#[derive(Error, Debug)]
pub enum AuthorizationError {
    #[error("Unauthorized at {stage:?}: {source}")]
    Unauthorized {
        stage: GuardStage,
        #[source]
        source: TokenError,
    },

    /// Covers both "no such account" and "not your account"
    #[error("Forbidden at {stage:?}: account {account_id}")]
    Forbidden {
        stage: GuardStage,
        account_id: i64,
    },
}

impl AuthorizationError {
    pub fn unauthorized(stage: GuardStage, source: TokenError) -> Self {
        Self::Unauthorized { stage, source }
    }

    pub fn forbidden(stage: GuardStage, account_id: i64) -> Self {
        Self::Forbidden { stage, account_id }
    }
}
