use super::account::Account;
use super::auth::VerifiedToken;

/// Progress of a request through the authorization guard
///
/// A rejection records the last stage the request had reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardStage {
    Unauthenticated,
    TokenVerified,
    OwnershipChecked,
    Authorized,
}

/// Caller identity handed to a guarded handler
#[derive(Debug, Clone)]
pub struct AuthorizedAccount {
    pub account: Account,
    pub token: VerifiedToken,
}
