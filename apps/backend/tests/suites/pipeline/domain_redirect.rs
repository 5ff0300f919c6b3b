use actix_web::http::header::HOST;
use actix_web::http::{Method, StatusCode};
use actix_web::test;
use budgetwise::config::app::{CANONICAL_ORIGIN, DEPRECATED_HOST};
use budgetwise::middleware::request_trace::REQUEST_ID_HEADER;

use crate::common::{header_value, location};
use crate::support::app::{init_app, TestEnv};
use crate::support::auth::register;

#[actix_web::test]
async fn test_deprecated_host_redirects_anonymous_request() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    // /Transaction is protected; the redirect still wins over the login challenge
    let req = test::TestRequest::get()
        .uri("/Transaction/Index?month=3")
        .insert_header((HOST, DEPRECATED_HOST))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        location(&resp),
        "https://www.budget-wise.net/Transaction/Index?month=3"
    );
}

#[actix_web::test]
async fn test_deprecated_host_root_has_no_query_marker() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((HOST, DEPRECATED_HOST))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("{CANONICAL_ORIGIN}/"));
}

#[actix_web::test]
async fn test_deprecated_host_redirect_ignores_method_and_identity() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let cookie = register(&app, "mover@example.com").await;

    let req = test::TestRequest::default()
        .method(Method::POST)
        .uri("/Category/Delete/4")
        .insert_header((HOST, DEPRECATED_HOST))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("{CANONICAL_ORIGIN}/Category/Delete/4"));
}

#[actix_web::test]
async fn test_redirect_response_still_carries_request_id() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let req = test::TestRequest::get()
        .uri("/Home/Privacy")
        .insert_header((HOST, DEPRECATED_HOST))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(header_value(&resp, REQUEST_ID_HEADER).is_some());
}

#[actix_web::test]
async fn test_other_hosts_pass_through() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let uppercase = DEPRECATED_HOST.to_uppercase();
    let with_port = format!("{DEPRECATED_HOST}:443");
    for host in [
        "www.budget-wise.net",
        "localhost:8080",
        uppercase.as_str(),
        with_port.as_str(),
    ] {
        let req = test::TestRequest::get()
            .uri("/Home/Privacy")
            .insert_header((HOST, host))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK, "host {host} should not redirect");
        assert_eq!(location(&resp), "");
    }
}

#[actix_web::test]
async fn test_canonical_host_gets_login_challenge_instead() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let req = test::TestRequest::get()
        .uri("/Transaction/Index?month=3")
        .insert_header((HOST, "www.budget-wise.net"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/Identity/Account/Login");
}

/// A web root with one stylesheet and a favicon.
fn web_root() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("create web root");
    std::fs::create_dir(dir.path().join("css")).expect("create css dir");
    std::fs::write(dir.path().join("css/site.css"), "body{}").expect("write stylesheet");
    std::fs::write(dir.path().join("favicon.ico"), [0u8; 4]).expect("write favicon");
    dir
}

#[actix_web::test]
async fn test_missing_asset_on_deprecated_host_still_redirects() {
    let env = TestEnv::new().await;
    let root = web_root();
    let mut config = env.config.clone();
    config.wwwroot = root.path().to_path_buf();
    let app = init_app(env.state.clone(), config).await;

    let req = test::TestRequest::get()
        .uri("/css/missing.css?v=2")
        .insert_header((HOST, DEPRECATED_HOST))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("{CANONICAL_ORIGIN}/css/missing.css?v=2"));
}

#[actix_web::test]
async fn test_existing_assets_are_served_before_the_redirect() {
    let env = TestEnv::new().await;
    let root = web_root();
    let mut config = env.config.clone();
    config.wwwroot = root.path().to_path_buf();
    let app = init_app(env.state.clone(), config).await;

    for uri in ["/css/site.css", "/favicon.ico"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header((HOST, DEPRECATED_HOST))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK, "{uri} should be served");
        assert_eq!(location(&resp), "");
    }

    // a miss on the canonical host reaches the router
    let req = test::TestRequest::get()
        .uri("/css/missing.css")
        .insert_header((HOST, "www.budget-wise.net"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
