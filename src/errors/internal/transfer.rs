use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Transfer amount must be positive, got {0}")]
    InvalidAmount(i64),

    #[error("Cannot transfer from account {0} to itself")]
    SelfTransfer(i64),

    /// Credit leg failed after the debit; the debit has been reversed
    #[error("Transfer to account {to_account_number} failed: {reason}")]
    TransferFailed {
        to_account_number: i64,
        reason: String,
    },
}
