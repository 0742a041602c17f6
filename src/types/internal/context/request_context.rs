use std::net::IpAddr;

use poem::Request;
use poem_openapi::auth::{Bearer, BearerAuthorization};

use crate::types::internal::auth::AccessToken;

use super::{request_id::RequestId, request_source::RequestSource};

/// Header older clients use instead of `Authorization: Bearer`
pub const LEGACY_TOKEN_HEADER: &str = "x-auth-token";

/// Request context that flows from the API layer into the guard and coordinators
///
/// Carries what is needed for tracing (request id, client address, source) and
/// the raw bearer token, if one was presented. The token is unverified here;
/// only the authorization guard decides what it is worth.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Source of the request (HTTP or CLI)
    pub source: RequestSource,

    /// Bearer token exactly as presented
    pub bearer: Option<AccessToken>,
}

impl RequestContext {
    /// Create a RequestContext for CLI operations
    pub fn for_cli(command_name: &str) -> Self {
        tracing::debug!("CLI context for command {}", command_name);
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            source: RequestSource::Cli,
            bearer: None,
        }
    }

    /// Create RequestContext from an HTTP request
    ///
    /// Call at the beginning of every endpoint. Extracts the client address
    /// and the bearer token (if any) without validating it.
    pub fn from_request(req: &Request) -> Self {
        let ctx = Self {
            ip_address: Self::extract_ip_address(req),
            request_id: RequestId::new(),
            source: RequestSource::Http,
            bearer: Self::extract_bearer(req),
        };

        tracing::trace!("Request context created: {:?}", ctx);

        ctx
    }

    /// Set the bearer token
    pub fn with_bearer(mut self, token: impl Into<AccessToken>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Set the ip_address
    pub fn with_ip_address(mut self, ip_address: IpAddr) -> Self {
        self.ip_address = Some(ip_address);
        self
    }

    fn extract_bearer(req: &Request) -> Option<AccessToken> {
        let token = match Bearer::from_request(req) {
            Ok(bearer) => Some(bearer.token),
            Err(_) => req.header(LEGACY_TOKEN_HEADER).map(str::to_string),
        };

        token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(AccessToken::from)
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        // Fall back to remote address
        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            source: RequestSource::Http,
            bearer: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_extracted_from_authorization_header() {
        let req = Request::builder()
            .header("Authorization", "Bearer abc.def.ghi")
            .finish();

        let ctx = RequestContext::from_request(&req);

        assert_eq!(ctx.source, RequestSource::Http);
        assert_eq!(ctx.bearer.as_ref().map(|t| t.as_str()), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_falls_back_to_legacy_header() {
        let req = Request::builder()
            .header(LEGACY_TOKEN_HEADER, "abc.def.ghi")
            .finish();

        let ctx = RequestContext::from_request(&req);

        assert_eq!(ctx.bearer.as_ref().map(|t| t.as_str()), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_or_blank_token_is_none() {
        let req = Request::builder().finish();
        assert!(RequestContext::from_request(&req).bearer.is_none());

        let req = Request::builder().header(LEGACY_TOKEN_HEADER, "   ").finish();
        assert!(RequestContext::from_request(&req).bearer.is_none());
    }

    #[test]
    fn test_forwarded_for_takes_first_address() {
        let req = Request::builder()
            .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
            .finish();

        let ctx = RequestContext::from_request(&req);

        assert_eq!(ctx.ip_address, Some("203.0.113.7".parse().unwrap()));
    }

    #[test]
    fn test_for_cli_has_no_token() {
        let ctx = RequestContext::for_cli("list-accounts");

        assert_eq!(ctx.source, RequestSource::Cli);
        assert!(ctx.bearer.is_none());
        assert!(ctx.ip_address.is_none());
    }
}
