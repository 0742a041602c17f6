// Stores layer - Data access and repository pattern
use async_trait::async_trait;

use crate::errors::InternalError;
use crate::types::internal::account::{Account, NewAccount};

pub mod account_store;
pub mod credential_store;
pub mod memory_account_store;

pub use account_store::SeaOrmAccountStore;
pub use credential_store::CredentialStore;
pub use memory_account_store::InMemoryAccountStore;

/// Durable account state
///
/// Every component depends on this trait, never on a concrete backend.
/// Lookups fail with `AccountError::NotFound` when the row is absent.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account and return it with its assigned id
    ///
    /// Fails with `AccountError::Conflict` when the account number is taken.
    async fn create(&self, new_account: NewAccount) -> Result<Account, InternalError>;

    async fn get_by_id(&self, id: i64) -> Result<Account, InternalError>;

    async fn get_by_number(&self, account_number: i64) -> Result<Account, InternalError>;

    /// All accounts ordered by id
    async fn list(&self) -> Result<Vec<Account>, InternalError>;

    /// Permanently remove an account; deleting twice is an error
    async fn delete(&self, id: i64) -> Result<(), InternalError>;

    /// Atomically add `delta` to the balance and return the new balance
    ///
    /// The only balance mutator. When the result would be negative nothing is
    /// written and `AccountError::InsufficientFunds` is returned.
    async fn adjust_balance(&self, id: i64, delta: i64) -> Result<i64, InternalError>;
}
