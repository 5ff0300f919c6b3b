//! Production exception handler: server errors become the generic error
//! page. Client errors and everything else pass through.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::ContentType;
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::error;

use super::request_trace::TraceId;
use crate::views;

pub struct ErrorPage;

impl<S, B> Transform<S, ServiceRequest> for ErrorPage
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorPageMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorPageMiddleware { service }))
    }
}

pub struct ErrorPageMiddleware<S> {
    service: S,
}

/// The generic error page response.
pub fn error_page_response(request_id: &str) -> HttpResponse {
    HttpResponse::InternalServerError()
        .content_type(ContentType::html())
        .body(views::error_page(request_id))
}

impl<S, B> Service<ServiceRequest> for ErrorPageMiddleware<S>
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
        let http_req = req.request().clone();
        let request_id = req
            .extensions()
            .get::<TraceId>()
            .map(|id| id.0.clone())
            .unwrap_or_default();

        let fut = self.service.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(res) if res.status().is_server_error() => {
                    if let Some(err) = res.response().error() {
                        error!(error = %err, "unhandled_server_error");
                    }
                    let (http_req, _) = res.into_parts();
                    Ok(ServiceResponse::new(http_req, error_page_response(&request_id))
                        .map_into_right_body())
                }
                Ok(res) => Ok(res.map_into_left_body()),
                Err(err) => {
                    error!(error = %err, "unhandled_server_error");
                    Ok(ServiceResponse::new(http_req, error_page_response(&request_id))
                        .map_into_right_body())
                }
            }
        })
    }
}
