use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::TokenProvider;
use crate::stores::{AccountStore, CredentialStore};
use crate::types::internal::context::RequestContext;

pub struct LoginCoordinator {
    account_store: Arc<dyn AccountStore>,
    credential_store: Arc<CredentialStore>,
    token_provider: Arc<TokenProvider>,
}

impl LoginCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            account_store: app_data.account_store.clone(),
            credential_store: app_data.credential_store.clone(),
            token_provider: app_data.token_provider.clone(),
        }
    }

    /// Check the password and issue an access token for the account number
    ///
    /// An unknown account number and a wrong password fail the same way.
    pub async fn login(
        &self,
        ctx: &RequestContext,
        account_number: i64,
        password: &str,
    ) -> Result<String, InternalError> {
        let account = match self.account_store.get_by_number(account_number).await {
            Ok(account) => account,
            Err(e) if e.is_not_found() => {
                tracing::debug!(request_id = %ctx.request_id, "Login for unknown account number");
                return Err(CredentialError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        if !self.credential_store.verify(password, &account.password_hash) {
            tracing::warn!(
                request_id = %ctx.request_id,
                ip = ?ctx.ip_address,
                "Failed login for account {}",
                account.id
            );
            return Err(CredentialError::InvalidCredentials.into());
        }

        let token = self.token_provider.issue(account.account_number)?;

        tracing::info!(request_id = %ctx.request_id, "Account {} logged in", account.id);

        Ok(token)
    }
}
