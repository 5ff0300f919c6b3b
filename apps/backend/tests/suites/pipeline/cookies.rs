use std::time::{Duration as StdDuration, SystemTime};

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::test;
use budgetwise::auth::mint_session_token;
use budgetwise::config::cookies::SESSION_COOKIE_NAME;

use crate::support::app::{init_app, TestEnv};
use crate::support::auth::{register, session_cookie};

#[actix_web::test]
async fn test_session_cookie_attributes_after_policy() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let cookie = register(&app, "attrs@example.com").await;

    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    // stricter than the policy minimum, so it stays
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(Duration::days(14)));
}

#[actix_web::test]
async fn test_logout_clears_session_cookie() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let cookie = register(&app, "leaver@example.com").await;

    let req = test::TestRequest::post()
        .uri("/Identity/Account/Logout")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    let cleared = session_cookie(&resp).expect("logout should clear the cookie");
    assert_eq!(cleared.value(), "");
    assert_eq!(cleared.max_age(), Some(Duration::ZERO));
    assert_eq!(cleared.secure(), Some(true));
    assert_eq!(cleared.http_only(), Some(true));

    // exactly one Set-Cookie for the session; authentication must not add another
    let count = resp
        .response()
        .cookies()
        .filter(|c| c.name() == SESSION_COOKIE_NAME)
        .count();
    assert_eq!(count, 1);
}

#[actix_web::test]
async fn test_fresh_session_is_not_reissued() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let cookie = register(&app, "fresh@example.com").await;

    let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(session_cookie(&resp).is_none());
}

#[actix_web::test]
async fn test_session_past_half_life_slides() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let eight_days_ago = SystemTime::now() - StdDuration::from_secs(8 * 24 * 60 * 60);
    let stale = mint_session_token(
        "user-slide",
        "slide@example.com",
        eight_days_ago,
        Duration::days(14),
        &env.state.security,
    )
    .unwrap();

    let req = test::TestRequest::get()
        .uri("/")
        .cookie(Cookie::new(SESSION_COOKIE_NAME, stale.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let refreshed = session_cookie(&resp).expect("stale session should be re-issued");
    assert_ne!(refreshed.value(), stale);
    assert!(!refreshed.value().is_empty());
    assert_eq!(refreshed.secure(), Some(true));
}
