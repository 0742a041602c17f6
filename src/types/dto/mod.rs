// API request/response models
pub mod account;
pub mod auth;
pub mod common;
