use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::Json};
use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::LoginCoordinator;
use crate::errors::ApiError;
use crate::providers::TOKEN_TTL_SECONDS;
use crate::types::dto::auth::{LoginRequest, TokenResponse};
use crate::types::internal::context::RequestContext;

/// Authentication API endpoints
pub struct AuthApi {
    login_coordinator: Arc<LoginCoordinator>,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            login_coordinator: Arc::new(LoginCoordinator::new(app_data)),
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi]
impl AuthApi {
    /// Exchange an account number and password for a bearer token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(
        &self,
        req: &Request,
        body: Json<LoginRequest>,
    ) -> Result<Json<TokenResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let token = self
            .login_coordinator
            .login(&ctx, body.account_number, &body.password)
            .await?;

        Ok(Json(TokenResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: TOKEN_TTL_SECONDS,
            account_number: body.account_number,
        }))
    }
}
