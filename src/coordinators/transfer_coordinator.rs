use std::sync::Arc;
use std::time::Duration;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::TransferError;
use crate::stores::AccountStore;
use crate::types::internal::account::Account;
use crate::types::internal::context::RequestContext;

/// Attempts to put a debit back after the credit leg failed
pub const COMPENSATION_ATTEMPTS: u32 = 5;

const COMPENSATION_BACKOFF: Duration = Duration::from_millis(50);

/// Completed transfer, as seen by the source account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub from_account_number: i64,
    pub to_account_number: i64,
    pub amount: i64,
    /// Source balance after the debit
    pub balance: i64,
}

/// Moves funds between two accounts
///
/// Each leg is a single `adjust_balance` call, so no two-account lock is
/// taken. The debit always runs first. If the credit then fails the debit
/// is reversed and the caller gets `TransferFailed`; if the reversal cannot
/// be applied either, the result is a `Consistency` error.
pub struct TransferCoordinator {
    account_store: Arc<dyn AccountStore>,
}

impl TransferCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            account_store: app_data.account_store.clone(),
        }
    }

    /// Amounts are positive minor units
    pub fn validate_amount(amount: i64) -> Result<(), TransferError> {
        if amount <= 0 {
            return Err(TransferError::InvalidAmount(amount));
        }
        Ok(())
    }

    /// Transfer `amount` from `source` to the account numbered `to_account_number`
    ///
    /// # Returns
    /// * `Ok(TransferReceipt)` - Both legs applied
    /// * `Err(TransferError::InvalidAmount | SelfTransfer)` - Nothing touched
    /// * `Err(AccountError::NotFound)` - Destination does not exist
    /// * `Err(AccountError::InsufficientFunds)` - Debit refused, nothing changed
    /// * `Err(TransferError::TransferFailed)` - Credit failed, debit reversed
    /// * `Err(InternalError::Consistency)` - Credit failed and the reversal failed too
    pub async fn transfer(
        &self,
        ctx: &RequestContext,
        source: &Account,
        to_account_number: i64,
        amount: i64,
    ) -> Result<TransferReceipt, InternalError> {
        Self::validate_amount(amount)?;

        if to_account_number == source.account_number {
            return Err(TransferError::SelfTransfer(source.account_number).into());
        }

        let destination = self.account_store.get_by_number(to_account_number).await?;

        let balance = self.account_store.adjust_balance(source.id, -amount).await?;

        if let Err(credit_err) = self.account_store.adjust_balance(destination.id, amount).await {
            tracing::warn!(
                request_id = %ctx.request_id,
                "Credit of {} to account {} failed after debit of account {}: {}",
                amount,
                destination.id,
                source.id,
                credit_err
            );

            self.compensate(ctx, source.id, amount).await?;

            return Err(TransferError::TransferFailed {
                to_account_number,
                reason: credit_err.to_string(),
            }
            .into());
        }

        tracing::info!(
            request_id = %ctx.request_id,
            "Transferred {} from account {} to account {}",
            amount,
            source.id,
            destination.id
        );

        Ok(TransferReceipt {
            from_account_number: source.account_number,
            to_account_number,
            amount,
            balance,
        })
    }

    /// Credit `amount` back to `account_id`, retrying with linear backoff
    async fn compensate(
        &self,
        ctx: &RequestContext,
        account_id: i64,
        amount: i64,
    ) -> Result<(), InternalError> {
        for attempt in 1..=COMPENSATION_ATTEMPTS {
            match self.account_store.adjust_balance(account_id, amount).await {
                Ok(balance) => {
                    tracing::warn!(
                        request_id = %ctx.request_id,
                        "Reversed debit of {} on account {} (attempt {}), balance {}",
                        amount,
                        account_id,
                        attempt,
                        balance
                    );
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(
                        request_id = %ctx.request_id,
                        "Reversal of {} on account {} failed (attempt {}/{}): {}",
                        amount,
                        account_id,
                        attempt,
                        COMPENSATION_ATTEMPTS,
                        e
                    );
                    if attempt < COMPENSATION_ATTEMPTS {
                        tokio::time::sleep(COMPENSATION_BACKOFF * attempt).await;
                    }
                }
            }
        }

        tracing::error!(
            request_id = %ctx.request_id,
            "Debit of {} on account {} could not be reversed",
            amount,
            account_id
        );

        Err(InternalError::Consistency {
            operation: "transfer_compensation".to_string(),
            account_id,
            amount,
        })
    }
}
