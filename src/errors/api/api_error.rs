use crate::errors::internal::{
    AccountError, AuthorizationError, CredentialError, InternalError, TransferError,
};
use crate::types::dto::common::ErrorResponse;
use poem::IntoResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Error responses for every endpoint
///
/// Every variant carries the same `{"error": message}` body.
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Malformed input, unknown fields, non-positive amount or insufficient funds
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Missing, invalid or expired token, or bad login credentials
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Valid token, but not for the requested account
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Requested resource does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Transfer could not be completed and was rolled back
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

fn body(message: impl Into<String>) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: message.into(),
    })
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(body(message))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(body(message))
    }

    pub fn forbidden() -> Self {
        ApiError::Forbidden(body("permission denied"))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(body(message))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(body(message))
    }

    /// Always generic; the cause is logged, never returned
    fn internal_server_error() -> Self {
        ApiError::InternalError(body("an internal error occurred"))
    }

    /// Convert InternalError to ApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            // Infrastructure errors - always log and return generic error
            InternalError::Database(_)
            | InternalError::Parse { .. }
            | InternalError::Crypto { .. } => {
                tracing::error!("Internal failure: {}", err);
                Self::internal_server_error()
            }
            InternalError::Consistency { .. } => {
                tracing::error!("Balance consistency failure: {}", err);
                Self::internal_server_error()
            }

            InternalError::Account(AccountError::NotFound(what)) => {
                tracing::debug!("Account not found: {}", what);
                Self::not_found("account not found")
            }
            InternalError::Account(AccountError::InsufficientFunds { account_id, .. }) => {
                tracing::debug!("Insufficient funds in account {}", account_id);
                Self::bad_request("insufficient funds")
            }
            InternalError::Account(AccountError::Validation(message)) => {
                tracing::debug!("Validation failed: {}", message);
                Self::bad_request(message.clone())
            }
            InternalError::Account(AccountError::Conflict(_)) => {
                // Only reaches here once regeneration retries are exhausted
                tracing::error!("Account number allocation failed: {}", err);
                Self::internal_server_error()
            }

            InternalError::Token(token_err) => {
                tracing::debug!("Token rejected: {}", token_err);
                Self::unauthorized(token_err.to_string())
            }
            InternalError::Authorization(AuthorizationError::Unauthorized { stage, source }) => {
                tracing::debug!("Unauthorized at {:?}: {}", stage, source);
                Self::unauthorized(source.to_string())
            }
            InternalError::Authorization(AuthorizationError::Forbidden { stage, account_id }) => {
                tracing::warn!("Forbidden at {:?} for account {}", stage, account_id);
                Self::forbidden()
            }
            InternalError::Credential(CredentialError::InvalidCredentials) => {
                tracing::debug!("Invalid credentials attempt");
                Self::unauthorized("invalid account number or password")
            }

            InternalError::Transfer(TransferError::InvalidAmount(_))
            | InternalError::Transfer(TransferError::SelfTransfer(_)) => {
                tracing::debug!("Transfer rejected: {}", err);
                Self::bad_request(err.to_string())
            }
            InternalError::Transfer(TransferError::TransferFailed { .. }) => {
                tracing::warn!("Transfer rolled back: {}", err);
                Self::conflict("transfer could not be completed and was reversed")
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(json)
            | ApiError::Unauthorized(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::InternalError(json) => json.0.error.clone(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::InternalError(_) => 500,
        }
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Render framework-level rejections (body decode, path parsing, content type)
/// with the same JSON shape as handler errors
pub fn framework_rejection(err: impl fmt::Display) -> poem::Response {
    tracing::debug!("Request rejected before handler: {}", err);
    ApiError::bad_request(err.to_string()).into_response()
}
