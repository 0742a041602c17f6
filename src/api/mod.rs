// API layer - HTTP endpoints
pub mod account;
pub mod auth;
pub mod health;

use std::sync::Arc;

use poem::{EndpointExt, Route, endpoint::BoxEndpoint, middleware::Tracing};
use poem_openapi::OpenApiService;
use poem_openapi::error::{ContentTypeError, ParseParamError, ParseRequestPayloadError};

pub use account::AccountApi;
pub use auth::AuthApi;
pub use health::HealthApi;

use crate::app_data::AppData;
use crate::errors::api::api_error::framework_rejection;

/// Assemble the HTTP application
///
/// API under `/api`, Swagger UI under `/swagger`. Request decoding failures
/// (bad JSON, unknown fields, non-numeric path ids, wrong content type) come
/// back as 400 with the usual `{"error": ...}` body.
pub fn build_app(app_data: Arc<AppData>, server_url: &str) -> BoxEndpoint<'static> {
    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(app_data.clone()),
            AccountApi::new(app_data),
        ),
        "Bank Backend API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url);

    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .catch_error(|err: ParseRequestPayloadError| async move { framework_rejection(err) })
        .catch_error(|err: ParseParamError| async move { framework_rejection(err) })
        .catch_error(|err: ContentTypeError| async move { framework_rejection(err) })
        .with(Tracing)
        .map_to_response()
        .boxed()
}
