use thiserror::Error;

pub mod account;
pub mod authorization;
pub mod credential;
pub mod database;
pub mod token;
pub mod transfer;

pub use account::AccountError;
pub use authorization::AuthorizationError;
pub use credential::CredentialError;
pub use database::DatabaseError;
pub use token::TokenError;
pub use transfer::TransferError;

/// Internal error type for store, provider and coordinator operations
///
/// Infrastructure errors (database, parse, crypto, consistency) are shared;
/// domain errors are grouped per component. Not exposed via API - endpoints
/// convert to `ApiError` through `ApiError::from_internal_error`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    /// A compensating action could not be applied; total balance is off by `amount`
    #[error("Consistency error: {operation} could not restore {amount} to account {account_id}")]
    Consistency {
        operation: String,
        account_id: i64,
        amount: i64,
    },

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// True when the error is an account lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, InternalError::Account(AccountError::NotFound(_)))
    }
}
