use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::claims::SessionClaims;
use crate::routing::table::ResolvedEndpoint;

/// Outcome of the authorization stage for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Anonymous request to a protected endpoint.
    Challenge,
}

/// Evaluates the resolved endpoint's requirement and records an
/// [`AccessDecision`]. The challenge is issued by the dispatcher, so stages
/// between here and dispatch (the domain redirect) still get to answer.
pub struct Authorization;

impl<S, B> Transform<S, ServiceRequest> for Authorization
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthorizationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizationMiddleware { service }))
    }
}

pub struct AuthorizationMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthorizationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let decision = {
            let extensions = req.extensions();
            let protected = extensions
                .get::<ResolvedEndpoint>()
                .is_some_and(ResolvedEndpoint::requires_auth);
            if protected && !extensions.contains::<SessionClaims>() {
                AccessDecision::Challenge
            } else {
                AccessDecision::Allow
            }
        };
        req.extensions_mut().insert(decision);

        Box::pin(self.service.call(req))
    }
}

/// Redirect an anonymous request to the sign-in page.
pub fn login_challenge(login_path: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, login_path))
        .finish()
}
