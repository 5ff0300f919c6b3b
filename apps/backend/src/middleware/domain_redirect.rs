//! Host-based redirect away from the retired host.
//!
//! A request whose Host header is exactly the deprecated host is answered
//! with `302 Found` to the canonical origin, keeping path and query; the
//! router is never reached. Every other request passes through untouched.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::info;

use crate::config::DomainRedirectRule;
use crate::request_context::RequestContext;

pub struct DomainRedirect {
    rule: Rc<DomainRedirectRule>,
}

impl DomainRedirect {
    pub fn new(rule: DomainRedirectRule) -> Self {
        Self {
            rule: Rc::new(rule),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for DomainRedirect
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = DomainRedirectMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(DomainRedirectMiddleware {
            service,
            rule: Rc::clone(&self.rule),
        }))
    }
}

pub struct DomainRedirectMiddleware<S> {
    service: S,
    rule: Rc<DomainRedirectRule>,
}

impl<S, B> Service<ServiceRequest> for DomainRedirectMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let ctx = RequestContext::from_service_request(&req);

        match self.rule.redirect_target(&ctx.host, &ctx.path, ctx.query.as_deref()) {
            Some(location) => Box::pin(async move {
                info!(host = %ctx.host, location = %location, "domain_redirect");
                let response = HttpResponse::Found()
                    .insert_header((header::LOCATION, location))
                    .finish();
                Ok(req.into_response(response).map_into_right_body())
            }),
            None => {
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
        }
    }
}
