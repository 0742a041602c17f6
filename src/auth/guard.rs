use std::future::Future;
use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::{AuthorizationError, TokenError};
use crate::providers::TokenProvider;
use crate::stores::AccountStore;
use crate::types::internal::auth::VerifiedToken;
use crate::types::internal::authorization::{AuthorizedAccount, GuardStage};
use crate::types::internal::context::RequestContext;

/// Per-request authorization
///
/// Walks `Unauthenticated -> TokenVerified -> OwnershipChecked -> Authorized`.
/// A request that stops early is rejected with the stage it had reached:
/// token problems are `Unauthorized`, anything about the target account is
/// `Forbidden`. A missing account and someone else's account look the same
/// to the caller.
pub struct AuthorizationGuard {
    token_provider: Arc<TokenProvider>,
    account_store: Arc<dyn AccountStore>,
}

impl AuthorizationGuard {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: app_data.token_provider.clone(),
            account_store: app_data.account_store.clone(),
        }
    }

    /// First transition only: Unauthenticated -> TokenVerified
    ///
    /// Used on its own by endpoints that need a caller but no target account.
    pub fn verify_token(&self, ctx: &RequestContext) -> Result<VerifiedToken, InternalError> {
        let stage = GuardStage::Unauthenticated;

        let bearer = ctx
            .bearer
            .as_ref()
            .ok_or_else(|| AuthorizationError::unauthorized(stage, TokenError::Missing))?;

        let verified = self.token_provider.verify(bearer.as_str()).map_err(|e| {
            tracing::debug!(request_id = %ctx.request_id, "Token rejected: {}", e);
            AuthorizationError::unauthorized(stage, e)
        })?;

        Ok(verified)
    }

    /// Run every stage for the account identified by `account_id`
    pub async fn authorize(
        &self,
        ctx: &RequestContext,
        account_id: i64,
    ) -> Result<AuthorizedAccount, InternalError> {
        let token = self.verify_token(ctx)?;
        let stage = GuardStage::TokenVerified;

        let account = match self.account_store.get_by_id(account_id).await {
            Ok(account) => account,
            Err(e) if e.is_not_found() => {
                tracing::debug!(request_id = %ctx.request_id, "Account {} not found", account_id);
                return Err(AuthorizationError::forbidden(stage, account_id).into());
            }
            Err(e) => return Err(e),
        };

        if account.account_number != token.account_number {
            tracing::warn!(
                request_id = %ctx.request_id,
                "Token for account number {} used on account {}",
                token.account_number,
                account_id
            );
            return Err(AuthorizationError::forbidden(stage, account_id).into());
        }

        let stage = GuardStage::OwnershipChecked;
        tracing::trace!(request_id = %ctx.request_id, "{:?} -> {:?}", stage, GuardStage::Authorized);

        Ok(AuthorizedAccount { account, token })
    }

    /// Authorize, then run `handler` with the caller's account
    ///
    /// The handler is never invoked when authorization fails.
    pub async fn guard<F, Fut, T>(
        &self,
        ctx: &RequestContext,
        account_id: i64,
        handler: F,
    ) -> Result<T, InternalError>
    where
        F: FnOnce(AuthorizedAccount) -> Fut,
        Fut: Future<Output = Result<T, InternalError>>,
    {
        let authorized = self.authorize(ctx, account_id).await?;
        handler(authorized).await
    }
}
