// Internal domain types
pub mod account;
pub mod auth;
pub mod authorization;
pub mod context;
