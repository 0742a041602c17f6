use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::{AppConfig, SecretManager};
use crate::providers::{AccountNumberSource, RandomAccountNumbers, TokenProvider};
use crate::stores::{AccountStore, CredentialStore, SeaOrmAccountStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once at startup and shared across the guard
/// and coordinators. Server and CLI use the same instance.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(db, config)
///   ├─ secret_manager (Arc<SecretManager>)
///   ├─ account_store (Arc<dyn AccountStore>)
///   ├─ credential_store (Arc<CredentialStore>)
///   ├─ token_provider (Arc<TokenProvider>)
///   └─ account_numbers (Arc<dyn AccountNumberSource>)
///   ↓ wrapped in Arc<AppData>
///   ├─ AuthorizationGuard::new(app_data)
///   ├─ AccountCoordinator::new(app_data)
///   ├─ LoginCoordinator::new(app_data)
///   └─ TransferCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub secret_manager: Arc<SecretManager>,
    pub account_store: Arc<dyn AccountStore>,
    pub credential_store: Arc<CredentialStore>,
    pub token_provider: Arc<TokenProvider>,
    pub account_numbers: Arc<dyn AccountNumberSource>,
}

impl AppData {
    /// Production wiring over a migrated database connection
    pub fn init(db: DatabaseConnection, config: &AppConfig) -> Self {
        tracing::debug!("Initializing AppData...");

        let app_data = Self::with_store(
            config.secrets.clone(),
            Arc::new(SeaOrmAccountStore::new(db)),
            Arc::new(RandomAccountNumbers),
        );

        tracing::debug!("AppData initialization complete");
        app_data
    }

    /// Wire everything around the given store and number source
    pub fn with_store(
        secret_manager: Arc<SecretManager>,
        account_store: Arc<dyn AccountStore>,
        account_numbers: Arc<dyn AccountNumberSource>,
    ) -> Self {
        let credential_store = Arc::new(CredentialStore::new(
            secret_manager.password_pepper().to_string(),
        ));
        let token_provider = Arc::new(TokenProvider::new(secret_manager.clone()));

        Self {
            secret_manager,
            account_store,
            credential_store,
            token_provider,
            account_numbers,
        }
    }
}
