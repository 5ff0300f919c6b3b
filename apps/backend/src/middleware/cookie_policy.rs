use actix_web::cookie::Cookie;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::Error;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::warn;

use crate::config::CookiePolicyOptions;

/// Enforces [`CookiePolicyOptions`] on every `Set-Cookie` the response
/// carries, whichever stage or handler added it.
pub struct CookiePolicy {
    options: CookiePolicyOptions,
}

impl CookiePolicy {
    pub fn new(options: CookiePolicyOptions) -> Self {
        Self { options }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CookiePolicy
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CookiePolicyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CookiePolicyMiddleware {
            service,
            options: self.options,
        }))
    }
}

pub struct CookiePolicyMiddleware<S> {
    service: S,
    options: CookiePolicyOptions,
}

impl<S, B> Service<ServiceRequest> for CookiePolicyMiddleware<S>
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
        let is_https = req.connection_info().scheme() == "https";
        let options = self.options;
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            let headers = res.headers_mut();

            let raw: Vec<String> = headers
                .get_all(header::SET_COOKIE)
                .filter_map(|v| v.to_str().ok())
                .map(str::to_string)
                .collect();
            if raw.is_empty() {
                return Ok(res);
            }

            headers.remove(header::SET_COOKIE);
            for value in raw {
                let rewritten = match Cookie::parse(value.clone()) {
                    Ok(mut cookie) => {
                        options.apply(&mut cookie, is_https);
                        cookie.to_string()
                    }
                    Err(e) => {
                        warn!(error = %e, "unparseable_set_cookie_kept");
                        value
                    }
                };
                match HeaderValue::from_str(&rewritten) {
                    Ok(v) => headers.append(header::SET_COOKIE, v),
                    Err(e) => warn!(error = %e, "set_cookie_dropped"),
                }
            }
            Ok(res)
        })
    }
}
