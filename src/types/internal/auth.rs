use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::internal::TokenError;

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account number)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn account_number(&self) -> Result<i64, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Malformed)
    }
}

/// Outcome of a successful token verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedToken {
    pub account_number: i64,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Raw bearer token as presented by a client
#[derive(Clone, PartialEq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AccessToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AccessToken {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[access_token]")
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_account_number_parses_subject() {
        let claims = Claims {
            sub: "4821337".to_string(),
            iat: 0,
            exp: 10,
        };
        assert_eq!(claims.account_number(), Ok(4821337));
    }

    #[test]
    fn test_claims_with_non_numeric_subject_is_malformed() {
        let claims = Claims {
            sub: "alice".to_string(),
            iat: 0,
            exp: 10,
        };
        assert_eq!(claims.account_number(), Err(TokenError::Malformed));
    }

    #[test]
    fn test_access_token_never_prints_value() {
        let token = AccessToken::from("eyJhbGciOiJIUzI1NiJ9.secret.sig");
        assert!(!format!("{}", token).contains("secret"));
        assert!(!format!("{:?}", token).contains("secret"));
        assert_eq!(token.as_str(), "eyJhbGciOiJIUzI1NiJ9.secret.sig");
    }
}
