// Authorization layer - decides whether a request may touch an account
pub mod guard;

pub use guard::AuthorizationGuard;
