use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Account not found: {0}")]
    NotFound(String),

    /// Account number collided with an existing row; callers regenerate and retry
    #[error("Account number already in use: {0}")]
    Conflict(i64),

    #[error("Insufficient funds in account {account_id}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account_id: i64,
        balance: i64,
        requested: i64,
    },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl AccountError {
    pub fn id_not_found(id: i64) -> Self {
        Self::NotFound(format!("id {}", id))
    }

    pub fn number_not_found(account_number: i64) -> Self {
        Self::NotFound(format!("account number {}", account_number))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
