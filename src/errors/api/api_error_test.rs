#[cfg(test)]
mod tests {
    use crate::errors::ApiError;
    use crate::errors::internal::{
        AccountError, AuthorizationError, CredentialError, InternalError, TokenError, TransferError,
    };
    use crate::types::internal::authorization::GuardStage;
    use sea_orm::DbErr;

    #[test]
    fn test_database_error_converts_to_internal_server_error() {
        let db_err = DbErr::Custom("connection refused on 10.0.0.5".to_string());
        let internal_err = InternalError::database("get_account_by_id", db_err);
        let api_err = ApiError::from_internal_error(internal_err);

        assert_eq!(api_err.status_code(), 500);
        assert_eq!(api_err.message(), "an internal error occurred");
        assert!(!api_err.message().contains("10.0.0.5"));
    }

    #[test]
    fn test_crypto_error_converts_to_internal_server_error() {
        let internal_err = InternalError::crypto("hash_password", "entropy exhausted");
        let api_err = ApiError::from_internal_error(internal_err);

        assert_eq!(api_err.status_code(), 500);
        assert_eq!(api_err.message(), "an internal error occurred");
    }

    #[test]
    fn test_consistency_error_converts_to_internal_server_error() {
        let internal_err = InternalError::Consistency {
            operation: "transfer_compensation".to_string(),
            account_id: 7,
            amount: 100,
        };
        let api_err = ApiError::from_internal_error(internal_err);

        assert_eq!(api_err.status_code(), 500);
    }

    #[test]
    fn test_exhausted_account_number_conflict_is_internal() {
        let internal_err = InternalError::Account(AccountError::Conflict(1234567));
        let api_err = ApiError::from_internal_error(internal_err);

        assert_eq!(api_err.status_code(), 500);
        assert!(!api_err.message().contains("1234567"));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let internal_err = InternalError::Account(AccountError::id_not_found(42));
        let api_err = ApiError::from_internal_error(internal_err);

        assert_eq!(api_err.status_code(), 404);
    }

    #[test]
    fn test_insufficient_funds_maps_to_400_with_explicit_message() {
        let internal_err = InternalError::Account(AccountError::InsufficientFunds {
            account_id: 1,
            balance: 10,
            requested: 50,
        });
        let api_err = ApiError::from_internal_error(internal_err);

        assert_eq!(api_err.status_code(), 400);
        assert_eq!(api_err.message(), "insufficient funds");
    }

    #[test]
    fn test_token_errors_map_to_401() {
        for token_err in [
            TokenError::Missing,
            TokenError::Malformed,
            TokenError::InvalidSignature,
            TokenError::Expired,
        ] {
            let api_err = ApiError::from_internal_error(InternalError::Token(token_err));
            assert_eq!(api_err.status_code(), 401);
        }
    }

    #[test]
    fn test_guard_rejections_map_to_401_and_403() {
        let unauthorized = InternalError::Authorization(AuthorizationError::unauthorized(
            GuardStage::Unauthenticated,
            TokenError::Expired,
        ));
        assert_eq!(ApiError::from_internal_error(unauthorized).status_code(), 401);

        let forbidden = InternalError::Authorization(AuthorizationError::forbidden(
            GuardStage::TokenVerified,
            99,
        ));
        let api_err = ApiError::from_internal_error(forbidden);
        assert_eq!(api_err.status_code(), 403);
        assert_eq!(api_err.message(), "permission denied");
    }

    #[test]
    fn test_invalid_credentials_maps_to_401() {
        let internal_err = InternalError::Credential(CredentialError::InvalidCredentials);
        let api_err = ApiError::from_internal_error(internal_err);

        assert_eq!(api_err.status_code(), 401);
    }

    #[test]
    fn test_transfer_errors_mapping() {
        let invalid = InternalError::Transfer(TransferError::InvalidAmount(0));
        assert_eq!(ApiError::from_internal_error(invalid).status_code(), 400);

        let self_transfer = InternalError::Transfer(TransferError::SelfTransfer(1234567));
        assert_eq!(ApiError::from_internal_error(self_transfer).status_code(), 400);

        let failed = InternalError::Transfer(TransferError::TransferFailed {
            to_account_number: 7654321,
            reason: "destination vanished".to_string(),
        });
        assert_eq!(ApiError::from_internal_error(failed).status_code(), 409);
    }

    #[test]
    fn test_display_matches_message() {
        let api_err = ApiError::bad_request("firstName must not be empty");
        assert_eq!(format!("{}", api_err), "firstName must not be empty");
    }
}
