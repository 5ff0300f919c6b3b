//! Per-request view of the inbound request.
//!
//! Built on demand from the live request; never stored beyond the request
//! that produced it.

use actix_web::dev::ServiceRequest;
use actix_web::http::header;
use actix_web::{HttpMessage, HttpRequest};

use crate::auth::claims::SessionClaims;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Host header exactly as received (may include a port).
    pub host: String,
    /// Raw request path.
    pub path: String,
    /// Raw query string without the leading `?`; `None` when the URI has no
    /// `?` at all, `Some("")` for a bare trailing `?`.
    pub query: Option<String>,
    /// Authenticated user id, when the session cookie was valid.
    pub identity: Option<String>,
}

impl RequestContext {
    pub fn from_http_request(req: &HttpRequest) -> Self {
        let identity = req
            .extensions()
            .get::<SessionClaims>()
            .map(|claims| claims.sub.clone());

        Self {
            host: host_of(req),
            path: req.path().to_string(),
            query: req.uri().query().map(str::to_string),
            identity,
        }
    }

    pub fn from_service_request(req: &ServiceRequest) -> Self {
        Self::from_http_request(req.request())
    }

    /// Identity as a string, empty for anonymous requests.
    pub fn identity_or_empty(&self) -> &str {
        self.identity.as_deref().unwrap_or_default()
    }
}

/// Host header, falling back to the URI authority (HTTP/2).
fn host_of(req: &HttpRequest) -> String {
    req.headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or_else(|| req.uri().authority().map(|a| a.as_str().to_string()))
        .unwrap_or_default()
}
