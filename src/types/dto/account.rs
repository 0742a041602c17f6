use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::account::Account;

/// Request model for account creation
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase", deny_unknown_fields)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Public view of an account; never carries the password hash
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub account_number: i64,
    /// Balance in minor currency units
    pub balance: i64,
    /// Creation time (RFC 3339)
    pub created_at: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            account_number: account.account_number,
            balance: account.balance,
            created_at: account.created_at.to_rfc3339(),
        }
    }
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self::from(&account)
    }
}

/// Response model for account deletion
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DeleteAccountResponse {
    /// Id of the deleted account
    pub deleted: i64,
}

/// Request model for a transfer out of the path account
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
#[oai(rename_all = "camelCase", deny_unknown_fields)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransferRequest {
    /// Destination account number
    pub to_account_number: i64,

    /// Positive amount in minor currency units
    pub amount: i64,
}

/// Echo of a committed transfer
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub from_account_number: i64,
    pub to_account_number: i64,
    pub amount: i64,
    /// Source balance after the debit
    pub balance: i64,
}
