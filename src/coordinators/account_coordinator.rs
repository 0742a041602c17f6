use chrono::Utc;
use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::AccountError;
use crate::providers::AccountNumberSource;
use crate::stores::{AccountStore, CredentialStore};
use crate::types::internal::account::{Account, NewAccount};
use crate::types::internal::context::RequestContext;

/// Fresh account numbers tried before creation gives up
pub const MAX_ACCOUNT_NUMBER_ATTEMPTS: usize = 5;

const MAX_NAME_LENGTH: usize = 100;

/// Account lifecycle workflows shared by the API and the CLI
pub struct AccountCoordinator {
    account_store: Arc<dyn AccountStore>,
    credential_store: Arc<CredentialStore>,
    account_numbers: Arc<dyn AccountNumberSource>,
}

impl AccountCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            account_store: app_data.account_store.clone(),
            credential_store: app_data.credential_store.clone(),
            account_numbers: app_data.account_numbers.clone(),
        }
    }

    fn validate_name(field: &str, value: &str) -> Result<String, AccountError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AccountError::validation(format!("{} must not be empty", field)));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(AccountError::validation(format!(
                "{} must be at most {} characters",
                field, MAX_NAME_LENGTH
            )));
        }
        Ok(trimmed.to_string())
    }

    /// Create an account with a generated account number
    ///
    /// The password is hashed once; only the account number is regenerated
    /// when the store reports a collision.
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account, balance 0
    /// * `Err(InternalError)` - Validation failure, hashing failure, or
    ///   `AccountError::Conflict` once every attempt collided
    pub async fn create_account(
        &self,
        ctx: &RequestContext,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> Result<Account, InternalError> {
        let first_name = Self::validate_name("firstName", first_name)?;
        let last_name = Self::validate_name("lastName", last_name)?;
        if password.is_empty() {
            return Err(AccountError::validation("password must not be empty").into());
        }

        let password_hash = self.credential_store.hash(password)?;

        let mut new_account = NewAccount {
            first_name,
            last_name,
            account_number: 0,
            password_hash,
            created_at: Utc::now(),
        };

        let mut last_conflict = None;
        for attempt in 1..=MAX_ACCOUNT_NUMBER_ATTEMPTS {
            new_account = new_account.with_account_number(self.account_numbers.next_number());

            match self.account_store.create(new_account.clone()).await {
                Ok(account) => {
                    tracing::info!(
                        request_id = %ctx.request_id,
                        source = ctx.source.as_str(),
                        "Account {} created with number {}",
                        account.id,
                        account.account_number
                    );
                    return Ok(account);
                }
                Err(InternalError::Account(AccountError::Conflict(number))) => {
                    tracing::warn!(
                        request_id = %ctx.request_id,
                        "Account number {} already taken (attempt {}/{})",
                        number,
                        attempt,
                        MAX_ACCOUNT_NUMBER_ATTEMPTS
                    );
                    last_conflict = Some(number);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AccountError::Conflict(last_conflict.unwrap_or_default()).into())
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>, InternalError> {
        self.account_store.list().await
    }

    pub async fn delete_account(&self, ctx: &RequestContext, id: i64) -> Result<(), InternalError> {
        self.account_store.delete(id).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            source = ctx.source.as_str(),
            "Account {} deleted",
            id
        );

        Ok(())
    }

    /// Administrative deposit (positive) or withdrawal (negative)
    pub async fn adjust_balance(
        &self,
        ctx: &RequestContext,
        id: i64,
        delta: i64,
    ) -> Result<i64, InternalError> {
        if delta == 0 {
            return Err(AccountError::validation("delta must not be zero").into());
        }

        let balance = self.account_store.adjust_balance(id, delta).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            source = ctx.source.as_str(),
            "Account {} adjusted by {}, balance now {}",
            id,
            delta,
            balance
        );

        Ok(balance)
    }
}
