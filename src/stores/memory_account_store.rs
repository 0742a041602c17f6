use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::errors::InternalError;
use crate::errors::internal::AccountError;
use crate::stores::AccountStore;
use crate::types::internal::account::{Account, NewAccount};

#[derive(Default)]
struct State {
    last_id: i64,
    accounts: BTreeMap<i64, Account>,
}

/// Account store kept in process memory
///
/// Same contract as the relational store. A single lock covers all
/// accounts, so every call sees a consistent snapshot.
#[derive(Default)]
pub struct InMemoryAccountStore {
    state: Mutex<State>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, new_account: NewAccount) -> Result<Account, InternalError> {
        let mut state = self.state.lock().await;

        if state
            .accounts
            .values()
            .any(|a| a.account_number == new_account.account_number)
        {
            return Err(AccountError::Conflict(new_account.account_number).into());
        }

        state.last_id += 1;
        let account = Account {
            id: state.last_id,
            first_name: new_account.first_name,
            last_name: new_account.last_name,
            account_number: new_account.account_number,
            balance: 0,
            password_hash: new_account.password_hash,
            created_at: new_account.created_at,
        };
        state.accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn get_by_id(&self, id: i64) -> Result<Account, InternalError> {
        let state = self.state.lock().await;
        state
            .accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| AccountError::id_not_found(id).into())
    }

    async fn get_by_number(&self, account_number: i64) -> Result<Account, InternalError> {
        let state = self.state.lock().await;
        state
            .accounts
            .values()
            .find(|a| a.account_number == account_number)
            .cloned()
            .ok_or_else(|| AccountError::number_not_found(account_number).into())
    }

    async fn list(&self) -> Result<Vec<Account>, InternalError> {
        let state = self.state.lock().await;
        Ok(state.accounts.values().cloned().collect())
    }

    async fn delete(&self, id: i64) -> Result<(), InternalError> {
        let mut state = self.state.lock().await;
        state
            .accounts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AccountError::id_not_found(id).into())
    }

    async fn adjust_balance(&self, id: i64, delta: i64) -> Result<i64, InternalError> {
        let mut state = self.state.lock().await;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| AccountError::id_not_found(id))?;

        let new_balance = account
            .balance
            .checked_add(delta)
            .ok_or_else(|| AccountError::validation(format!("delta {} out of range", delta)))?;

        if new_balance < 0 {
            return Err(AccountError::InsufficientFunds {
                account_id: id,
                balance: account.balance,
                requested: -delta,
            }
            .into());
        }

        account.balance = new_balance;
        Ok(new_balance)
    }
}
