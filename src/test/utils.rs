// Test utilities shared across unit tests
// Only compiled when running tests

use chrono::Utc;
use migration::{AccountMigrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::app_data::AppData;
use crate::config::{MockEnvironment, SecretManager};
use crate::providers::AccountNumberSource;
use crate::stores::InMemoryAccountStore;
use crate::types::internal::account::{Account, NewAccount};

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_PEPPER: &str = "test-pepper-for-unit-tests";

/// In-memory SQLite database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    AccountMigrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn test_secret_manager() -> Arc<SecretManager> {
    let env = MockEnvironment::empty()
        .with_vars(&[("JWT_SECRET", TEST_JWT_SECRET), ("PASSWORD_PEPPER", TEST_PEPPER)]);
    Arc::new(SecretManager::from_env_provider(&env).expect("Failed to initialize test SecretManager"))
}

/// Hands out account numbers in a fixed order, repeating the last one
pub struct ScriptedAccountNumbers {
    numbers: Mutex<VecDeque<i64>>,
    last: Mutex<i64>,
}

impl ScriptedAccountNumbers {
    pub fn new(numbers: Vec<i64>) -> Self {
        Self {
            numbers: Mutex::new(numbers.into()),
            last: Mutex::new(1_000_000),
        }
    }
}

impl AccountNumberSource for ScriptedAccountNumbers {
    fn next_number(&self) -> i64 {
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.numbers.lock().unwrap().pop_front() {
            *last = next;
        }
        *last
    }
}

/// AppData over an empty in-memory store
pub fn in_memory_app_data() -> Arc<AppData> {
    app_data_with_numbers(ScriptedAccountNumbers::new(vec![]))
}

pub fn app_data_with_numbers(numbers: ScriptedAccountNumbers) -> Arc<AppData> {
    Arc::new(AppData::with_store(
        test_secret_manager(),
        Arc::new(InMemoryAccountStore::new()),
        Arc::new(numbers),
    ))
}

/// Unsaved account with a fixed number and a placeholder hash
pub fn new_account(first_name: &str, account_number: i64) -> NewAccount {
    NewAccount {
        first_name: first_name.to_string(),
        last_name: "Doe".to_string(),
        account_number,
        password_hash: "$argon2id$placeholder".to_string(),
        created_at: Utc::now(),
    }
}

/// Store an account directly, skipping password hashing
pub async fn create_account(app_data: &AppData, first_name: &str, account_number: i64) -> Account {
    app_data
        .account_store
        .create(new_account(first_name, account_number))
        .await
        .expect("Failed to create test account")
}

/// Store an account and deposit `balance` into it
pub async fn funded_account(
    app_data: &AppData,
    first_name: &str,
    account_number: i64,
    balance: i64,
) -> Account {
    let account = create_account(app_data, first_name, account_number).await;
    app_data
        .account_store
        .adjust_balance(account.id, balance)
        .await
        .expect("Failed to fund test account");
    app_data
        .account_store
        .get_by_id(account.id)
        .await
        .expect("Failed to reload test account")
}
