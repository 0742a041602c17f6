use thiserror::Error;

/// Bearer token verification failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// No bearer token on the request
    #[error("No bearer token presented")]
    Missing,

    /// Token is not structurally a JWT, has undecodable parts or unusable claims
    #[error("Token is malformed")]
    Malformed,

    /// Signature mismatch or a non-HMAC algorithm in the header
    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,
}
