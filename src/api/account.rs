use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};
use std::sync::Arc;

use crate::app_data::AppData;
use crate::auth::AuthorizationGuard;
use crate::coordinators::{AccountCoordinator, TransferCoordinator};
use crate::errors::{ApiError, InternalError};
use crate::types::dto::account::{
    AccountResponse, CreateAccountRequest, DeleteAccountResponse, TransferRequest,
    TransferResponse,
};
use crate::types::internal::context::RequestContext;

/// Account endpoints
///
/// Everything under `/account/:id` runs behind the authorization guard; the
/// path id must belong to the token's account.
pub struct AccountApi {
    guard: Arc<AuthorizationGuard>,
    account_coordinator: Arc<AccountCoordinator>,
    transfer_coordinator: Arc<TransferCoordinator>,
}

impl AccountApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            guard: Arc::new(AuthorizationGuard::new(app_data.clone())),
            account_coordinator: Arc::new(AccountCoordinator::new(app_data.clone())),
            transfer_coordinator: Arc::new(TransferCoordinator::new(app_data)),
        }
    }
}

/// API tags for account endpoints
#[derive(Tags)]
enum AccountTags {
    /// Account management and transfers
    Account,
}

#[OpenApi]
impl AccountApi {
    /// Open a new account
    #[oai(path = "/account", method = "post", tag = "AccountTags::Account")]
    async fn create_account(
        &self,
        req: &Request,
        body: Json<CreateAccountRequest>,
    ) -> Result<Json<AccountResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let account = self
            .account_coordinator
            .create_account(&ctx, &body.first_name, &body.last_name, &body.password)
            .await?;

        Ok(Json(account.into()))
    }

    /// List all accounts (any valid token)
    #[oai(path = "/account", method = "get", tag = "AccountTags::Account")]
    async fn list_accounts(&self, req: &Request) -> Result<Json<Vec<AccountResponse>>, ApiError> {
        let ctx = RequestContext::from_request(req);
        self.guard.verify_token(&ctx)?;

        let accounts = self.account_coordinator.list_accounts().await?;

        Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
    }

    /// Fetch the caller's own account
    #[oai(path = "/account/:id", method = "get", tag = "AccountTags::Account")]
    async fn get_account(
        &self,
        req: &Request,
        id: Path<i64>,
    ) -> Result<Json<AccountResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let authorized = self.guard.authorize(&ctx, id.0).await?;

        Ok(Json(authorized.account.into()))
    }

    /// Permanently delete the caller's own account
    #[oai(path = "/account/:id", method = "delete", tag = "AccountTags::Account")]
    async fn delete_account(
        &self,
        req: &Request,
        id: Path<i64>,
    ) -> Result<Json<DeleteAccountResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);
        let ctx_ref = &ctx;

        let deleted = self
            .guard
            .guard(ctx_ref, id.0, |authorized| async move {
                self.account_coordinator
                    .delete_account(ctx_ref, authorized.account.id)
                    .await?;
                Ok::<_, InternalError>(authorized.account.id)
            })
            .await?;

        Ok(Json(DeleteAccountResponse { deleted }))
    }

    /// Transfer funds from the caller's account to another account number
    #[oai(path = "/account/:id/transfer", method = "post", tag = "AccountTags::Account")]
    async fn transfer(
        &self,
        req: &Request,
        id: Path<i64>,
        body: Json<TransferRequest>,
    ) -> Result<Json<TransferResponse>, ApiError> {
        TransferCoordinator::validate_amount(body.amount).map_err(InternalError::from)?;

        let ctx = RequestContext::from_request(req);
        let ctx_ref = &ctx;
        let request = body.0;

        let receipt = self
            .guard
            .guard(ctx_ref, id.0, |authorized| async move {
                self.transfer_coordinator
                    .transfer(
                        ctx_ref,
                        &authorized.account,
                        request.to_account_number,
                        request.amount,
                    )
                    .await
            })
            .await?;

        Ok(Json(TransferResponse {
            from_account_number: receipt.from_account_number,
            to_account_number: receipt.to_account_number,
            amount: receipt.amount,
            balance: receipt.balance,
        }))
    }
}
