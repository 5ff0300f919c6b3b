use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::routing::table::{ResolvedEndpoint, RouteTable};

/// Matches the path against the route table and stores the
/// [`ResolvedEndpoint`] for the stages and the dispatcher behind it.
/// Unmatched paths pass through without an endpoint.
pub struct RouteResolution;

impl<S, B> Transform<S, ServiceRequest> for RouteResolution
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RouteResolutionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RouteResolutionMiddleware { service }))
    }
}

pub struct RouteResolutionMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RouteResolutionMiddleware<S>
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
        if let Some(endpoint) = RouteTable::standard().resolve(req.path()) {
            if let ResolvedEndpoint::Controller(m) = &endpoint {
                debug!(route = m.route, controller = %m.controller, action = %m.action, "route_resolved");
            }
            req.extensions_mut().insert(endpoint);
        }
        Box::pin(self.service.call(req))
    }
}
