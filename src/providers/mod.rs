// Providers layer - Work performers
//
// Providers do one job each and are composed by coordinators and the
// authorization guard.

pub mod account_number;
pub mod token_provider;

pub use account_number::{AccountNumberSource, RandomAccountNumbers};
pub use token_provider::{TOKEN_TTL_SECONDS, TokenProvider};
