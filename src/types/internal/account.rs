use chrono::{DateTime, Utc};
use std::fmt;

/// Account as held by the account store
#[derive(Clone, PartialEq)]
pub struct Account {
    /// Storage-assigned identity
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// External identity used for login and token binding
    pub account_number: i64,
    /// Minor currency units
    pub balance: i64,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("account_number", &self.account_number)
            .field("balance", &self.balance)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Account ready to be persisted; the store assigns the id
#[derive(Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub account_number: i64,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewAccount {
    pub fn with_account_number(mut self, account_number: i64) -> Self {
        self.account_number = account_number;
        self
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("account_number", &self.account_number)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}
