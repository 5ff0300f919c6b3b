//! Cookie authentication.
//!
//! Verifies the identity session cookie and stores its [`SessionClaims`] in
//! request extensions. A cookie that fails verification makes the request
//! anonymous and is cleared on the response. Valid cookies past half their
//! lifetime are re-issued (sliding expiration).

use std::time::SystemTime;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::warn;

use crate::auth::claims::SessionClaims;
use crate::auth::session::{
    mint_session_token, unix_seconds, verify_session_token, SessionTokenError,
};
use crate::logging::security;
use crate::state::app_state::AppState;

pub struct Authentication;

impl<S, B> Transform<S, ServiceRequest> for Authentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticationMiddleware { service }))
    }
}

pub struct AuthenticationMiddleware<S> {
    service: S,
}

/// What the response needs for the session cookie.
enum CookieAction {
    Keep,
    Refresh(SessionClaims),
    Clear(&'static str),
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
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
        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            return Box::pin(self.service.call(req));
        };
        let options = &state.session_cookie;

        let action = match req.cookie(&options.name) {
            None => CookieAction::Keep,
            Some(cookie) => match verify_session_token(cookie.value(), &state.security) {
                Ok(claims) => {
                    let stale = unix_seconds(SystemTime::now())
                        .map(|now| claims.needs_refresh(now))
                        .unwrap_or(false);
                    req.extensions_mut().insert(claims.clone());
                    if options.sliding_expiration && stale {
                        CookieAction::Refresh(claims)
                    } else {
                        CookieAction::Keep
                    }
                }
                Err(e) => CookieAction::Clear(match e {
                    SessionTokenError::Expired => "expired",
                    SessionTokenError::InvalidSignature => "invalid_signature",
                    SessionTokenError::Malformed => "malformed",
                }),
            },
        };

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            let options = &state.session_cookie;

            // a handler that signed in or out owns the cookie for this response
            let handler_set_cookie = res
                .response()
                .cookies()
                .any(|c| c.name() == options.name);

            let cookie = match action {
                _ if handler_set_cookie => None,
                CookieAction::Keep => None,
                CookieAction::Clear(reason) => {
                    security::session_rejected(reason);
                    Some(options.removal())
                }
                CookieAction::Refresh(claims) => match mint_session_token(
                    &claims.sub,
                    &claims.email,
                    SystemTime::now(),
                    options.lifetime,
                    &state.security,
                ) {
                    Ok(token) => Some(options.issue(token)),
                    Err(e) => {
                        warn!(error = %e, "session_refresh_failed");
                        None
                    }
                },
            };

            if let Some(cookie) = cookie {
                if let Err(e) = res.response_mut().add_cookie(&cookie) {
                    warn!(error = %e, "session_cookie_write_failed");
                }
            }
            Ok(res)
        })
    }
}
