use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use budgetwise::auth::verify_session_token;
use budgetwise::config::cookies::SESSION_COOKIE_NAME;
use budgetwise::SecurityConfig;

/// Satisfies the default password rules.
pub const PASSWORD: &str = "Passw0rd!";

/// The identity cookie set on a response, if any.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// Register `email` through the account page and return the session cookie.
pub async fn register<S, B>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/Identity/Account/Register")
        .set_form([
            ("Email", email),
            ("Password", PASSWORD),
            ("ConfirmPassword", PASSWORD),
        ])
        .to_request();
    let resp = test::call_service(app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND, "registration should redirect");
    session_cookie(&resp).expect("registration should set the session cookie")
}

/// Sign in through the login page and return the session cookie.
pub async fn login<S, B>(app: &S, email: &str, password: &str) -> Option<Cookie<'static>>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/Identity/Account/Login")
        .set_form([("Email", email), ("Password", password)])
        .to_request();
    let resp = test::call_service(app, req).await;
    session_cookie(&resp)
}

/// User id carried by a session cookie.
pub fn user_id(cookie: &Cookie<'_>, security: &SecurityConfig) -> String {
    verify_session_token(cookie.value(), security)
        .expect("session cookie should verify")
        .sub
}
