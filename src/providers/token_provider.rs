use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use std::fmt;
use std::sync::Arc;

use crate::config::SecretManager;
use crate::errors::InternalError;
use crate::errors::internal::TokenError;
use crate::types::internal::auth::{Claims, VerifiedToken};

/// Access tokens are valid for 24 hours
pub const TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

/// HMAC family only; anything else in the header is refused
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Issues and verifies signed access tokens bound to an account number
///
/// Verification is pure computation over the token and the signing secret.
pub struct TokenProvider {
    secret_manager: Arc<SecretManager>,
}

impl TokenProvider {
    pub fn new(secret_manager: Arc<SecretManager>) -> Self {
        Self { secret_manager }
    }

    /// Issue a token for `account_number`, valid from now for `TOKEN_TTL_SECONDS`
    pub fn issue(&self, account_number: i64) -> Result<String, InternalError> {
        self.issue_at(account_number, Utc::now())
    }

    pub fn issue_at(&self, account_number: i64, now: DateTime<Utc>) -> Result<String, InternalError> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: account_number.to_string(),
            iat,
            exp: iat + TOKEN_TTL_SECONDS,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_generation", format!("Failed to generate JWT: {}", e)))
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify signature, structure and expiry as of `now`
    ///
    /// # Returns
    /// * `Ok(VerifiedToken)` - Account number the token is bound to
    /// * `Err(TokenError::Malformed)` - Not a decodable JWT or unusable claims
    /// * `Err(TokenError::InvalidSignature)` - Wrong key or a non-HMAC algorithm
    /// * `Err(TokenError::Expired)` - `now >= exp`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<VerifiedToken, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.set_required_spec_claims(&["exp", "sub"]);
        // Expiry is checked below against the supplied clock, without leeway
        validation.validate_exp = false;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidAlgorithm => {
                tracing::warn!("Rejected token declaring a non-HMAC algorithm");
                TokenError::InvalidSignature
            }
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })?;

        let claims = token_data.claims;
        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(VerifiedToken {
            account_number: claims.account_number()?,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("ttl_seconds", &TOKEN_TTL_SECONDS)
            .finish()
    }
}
