// Common test utilities for integration tests

use bank_backend::AppData;
use bank_backend::api::build_app;
use bank_backend::config::{EnvironmentProvider, SecretManager};
use bank_backend::providers::RandomAccountNumbers;
use bank_backend::stores::SeaOrmAccountStore;
use migration::{AccountMigrator, MigratorTrait};
use poem::endpoint::BoxEndpoint;
use poem::test::TestClient;
use sea_orm::{Database, DatabaseConnection};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-key-with-32-chars";
pub const TEST_PEPPER: &str = "integration-pepper-16";

/// Fixed environment for building configuration without touching process state
pub struct TestEnvironment {
    vars: HashMap<String, String>,
}

impl TestEnvironment {
    pub fn new(vars: &[(&str, &str)]) -> Self {
        Self {
            vars: vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl EnvironmentProvider for TestEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    AccountMigrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// AppData over a fresh in-memory SQLite database
pub async fn setup_app_data() -> Arc<AppData> {
    let env = TestEnvironment::new(&[("JWT_SECRET", TEST_JWT_SECRET), ("PASSWORD_PEPPER", TEST_PEPPER)]);
    let secret_manager =
        Arc::new(SecretManager::from_env_provider(&env).expect("Failed to load test secrets"));

    Arc::new(AppData::with_store(
        secret_manager,
        Arc::new(SeaOrmAccountStore::new(setup_test_db().await)),
        Arc::new(RandomAccountNumbers),
    ))
}

/// Test client over the fully assembled application
pub async fn setup_test_client() -> (TestClient<BoxEndpoint<'static>>, Arc<AppData>) {
    let app_data = setup_app_data().await;
    let app = build_app(app_data.clone(), "http://localhost:3000/api");
    (TestClient::new(app), app_data)
}

/// Helper to manage environment variables in tests
///
/// Cleans up specified environment variables on creation and drop,
/// ensuring test isolation when dealing with global environment state.
pub struct EnvGuard {
    vars: Vec<String>,
}

impl EnvGuard {
    pub fn new(vars: Vec<&str>) -> Self {
        for var in &vars {
            unsafe {
                std::env::remove_var(var);
            }
        }
        Self {
            vars: vars.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in &self.vars {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }
}

/// Global mutex for tests that modify environment variables
///
/// Environment variables are process-global, so tests that modify them
/// must run serially to avoid race conditions.
pub static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());
