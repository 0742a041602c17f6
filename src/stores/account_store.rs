use async_trait::async_trait;
use chrono::DateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait, sea_query::Expr,
};

use crate::errors::InternalError;
use crate::errors::internal::{AccountError, DatabaseError};
use crate::stores::AccountStore;
use crate::types::db::account;
use crate::types::internal::account::{Account, NewAccount};

/// Relational account store backed by sea-orm
pub struct SeaOrmAccountStore {
    db: DatabaseConnection,
}

impl SeaOrmAccountStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Convert a database row into the domain type
///
/// Every query path goes through here.
fn to_account(model: account::Model) -> Result<Account, InternalError> {
    let created_at = DateTime::from_timestamp(model.created_at, 0).ok_or_else(|| {
        InternalError::parse(
            "created_at",
            format!("{} is not a valid unix timestamp", model.created_at),
        )
    })?;

    Ok(Account {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        account_number: model.account_number,
        balance: model.balance,
        password_hash: model.password_hash,
        created_at,
    })
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait]
impl AccountStore for SeaOrmAccountStore {
    async fn create(&self, new_account: NewAccount) -> Result<Account, InternalError> {
        let account_number = new_account.account_number;

        let active = account::ActiveModel {
            id: NotSet,
            first_name: Set(new_account.first_name),
            last_name: Set(new_account.last_name),
            account_number: Set(account_number),
            balance: Set(0),
            password_hash: Set(new_account.password_hash),
            created_at: Set(new_account.created_at.timestamp()),
        };

        let model = active.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                InternalError::Account(AccountError::Conflict(account_number))
            } else {
                InternalError::database("create_account", e)
            }
        })?;

        tracing::debug!("Account {} created with id {}", model.account_number, model.id);

        to_account(model)
    }

    async fn get_by_id(&self, id: i64) -> Result<Account, InternalError> {
        let model = account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_account_by_id", e))?
            .ok_or_else(|| AccountError::id_not_found(id))?;

        to_account(model)
    }

    async fn get_by_number(&self, account_number: i64) -> Result<Account, InternalError> {
        let model = account::Entity::find()
            .filter(account::Column::AccountNumber.eq(account_number))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_account_by_number", e))?
            .ok_or_else(|| AccountError::number_not_found(account_number))?;

        to_account(model)
    }

    async fn list(&self) -> Result<Vec<Account>, InternalError> {
        account::Entity::find()
            .order_by_asc(account::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_accounts", e))?
            .into_iter()
            .map(to_account)
            .collect()
    }

    async fn delete(&self, id: i64) -> Result<(), InternalError> {
        let result = account::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_account", e))?;

        if result.rows_affected == 0 {
            return Err(AccountError::id_not_found(id).into());
        }

        tracing::debug!("Account {} deleted", id);

        Ok(())
    }

    async fn adjust_balance(&self, id: i64, delta: i64) -> Result<i64, InternalError> {
        let floor = delta
            .checked_neg()
            .ok_or_else(|| AccountError::validation(format!("delta {} out of range", delta)))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|source| DatabaseError::TransactionBegin { source })?;

        // balance + delta >= 0, checked and applied by the database in one statement
        let result = account::Entity::update_many()
            .col_expr(
                account::Column::Balance,
                Expr::col(account::Column::Balance).add(delta),
            )
            .filter(account::Column::Id.eq(id))
            .filter(account::Column::Balance.gte(floor))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("adjust_balance", e))?;

        let current = account::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("read_balance", e))?
            .ok_or_else(|| AccountError::id_not_found(id))?;

        if result.rows_affected == 0 {
            return Err(AccountError::InsufficientFunds {
                account_id: id,
                balance: current.balance,
                requested: floor,
            }
            .into());
        }

        txn.commit()
            .await
            .map_err(|source| DatabaseError::TransactionCommit { source })?;

        tracing::debug!("Account {} balance adjusted by {} to {}", id, delta, current.balance);

        Ok(current.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{new_account, setup_test_db};
    use std::sync::Arc;

    async fn setup() -> SeaOrmAccountStore {
        SeaOrmAccountStore::new(setup_test_db().await)
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_zero_balance() {
        let store = setup().await;

        let first = store.create(new_account("Alice", 1_000_001)).await.unwrap();
        let second = store.create(new_account("Bob", 1_000_002)).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.balance, 0);
        assert_eq!(first.first_name, "Alice");
        assert_eq!(first.account_number, 1_000_001);
    }

    #[tokio::test]
    async fn test_duplicate_account_number_is_conflict() {
        let store = setup().await;
        store.create(new_account("Alice", 1_000_001)).await.unwrap();

        let err = store.create(new_account("Bob", 1_000_001)).await.unwrap_err();

        assert!(matches!(
            err,
            InternalError::Account(AccountError::Conflict(1_000_001))
        ));
    }

    #[tokio::test]
    async fn test_lookup_by_id_and_number() {
        let store = setup().await;
        let created = store.create(new_account("Alice", 1_000_001)).await.unwrap();

        let by_id = store.get_by_id(created.id).await.unwrap();
        let by_number = store.get_by_number(1_000_001).await.unwrap();

        assert_eq!(by_id, created);
        assert_eq!(by_number, created);
        assert!(store.get_by_id(created.id + 100).await.unwrap_err().is_not_found());
        assert!(store.get_by_number(9_999_999).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_is_ordered_and_restartable() {
        let store = setup().await;
        assert!(store.list().await.unwrap().is_empty());

        for (name, number) in [("Alice", 1_000_003), ("Bob", 1_000_001), ("Carol", 1_000_002)] {
            store.create(new_account(name, number)).await.unwrap();
        }

        let first_pass: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.first_name)
            .collect();
        let second_pass = store.list().await.unwrap();

        assert_eq!(first_pass, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(second_pass.len(), 3);
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let store = setup().await;
        let account = store.create(new_account("Alice", 1_000_001)).await.unwrap();

        store.delete(account.id).await.unwrap();

        assert!(store.get_by_id(account.id).await.unwrap_err().is_not_found());
        assert!(store.delete(account.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_adjust_balance_applies_delta() {
        let store = setup().await;
        let account = store.create(new_account("Alice", 1_000_001)).await.unwrap();

        assert_eq!(store.adjust_balance(account.id, 500).await.unwrap(), 500);
        assert_eq!(store.adjust_balance(account.id, -200).await.unwrap(), 300);
        assert_eq!(store.adjust_balance(account.id, -300).await.unwrap(), 0);
        assert_eq!(store.get_by_id(account.id).await.unwrap().balance, 0);
    }

    #[tokio::test]
    async fn test_adjust_balance_insufficient_funds_writes_nothing() {
        let store = setup().await;
        let account = store.create(new_account("Alice", 1_000_001)).await.unwrap();
        store.adjust_balance(account.id, 100).await.unwrap();

        let err = store.adjust_balance(account.id, -101).await.unwrap_err();

        match err {
            InternalError::Account(AccountError::InsufficientFunds {
                account_id,
                balance,
                requested,
            }) => {
                assert_eq!(account_id, account.id);
                assert_eq!(balance, 100);
                assert_eq!(requested, 101);
            }
            other => panic!("Expected InsufficientFunds, got {:?}", other),
        }
        assert_eq!(store.get_by_id(account.id).await.unwrap().balance, 100);
    }

    #[tokio::test]
    async fn test_adjust_balance_missing_account_is_not_found() {
        let store = setup().await;

        assert!(store.adjust_balance(42, 10).await.unwrap_err().is_not_found());
        assert!(store.adjust_balance(42, -10).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_concurrent_adjustments_are_serializable() {
        let store = Arc::new(setup().await);
        let account = store.create(new_account("Alice", 1_000_001)).await.unwrap();
        store.adjust_balance(account.id, 1_000).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = Arc::clone(&store);
            let delta = if i % 2 == 0 { 30 } else { -10 };
            handles.push(tokio::spawn(async move {
                store.adjust_balance(account.id, delta).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // 10 * 30 - 10 * 10
        assert_eq!(store.get_by_id(account.id).await.unwrap().balance, 1_200);
    }
}
