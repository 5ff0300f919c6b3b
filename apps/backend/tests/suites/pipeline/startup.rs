use actix_web::http::header::{HOST, STRICT_TRANSPORT_SECURITY};
use actix_web::http::StatusCode;
use actix_web::test;
use budgetwise::config::RuntimeEnv;
use budgetwise::licensing::registered_license;
use budgetwise::middleware::hsts::HSTS_VALUE;
use budgetwise::middleware::request_trace::REQUEST_ID_HEADER;
use budgetwise::server;
use budgetwise::AppError;
use sea_orm::ConnectionTrait;
use serde_json::Value;

use crate::common::{body_text, header_value};
use crate::support::app::{init_app, TestEnv};
use crate::support::auth::register;

#[actix_web::test]
async fn test_missing_connection_string_fails_before_bind() {
    let result = server::start(|key| match key {
        "DATABASE_URL" => Some(String::new()),
        "APP_ENV" => Some("Development".to_string()),
        _ => None,
    })
    .await;

    match result {
        Err(AppError::Config { detail }) => {
            assert_eq!(detail, "Database connection string is not configured.")
        }
        Err(other) => panic!("expected a configuration error, got {other:?}"),
        Ok(_) => panic!("server must not start without a connection string"),
    }
}

#[actix_web::test]
async fn test_bootstrap_registers_license_and_migrates() {
    let env = TestEnv::new().await;
    assert_eq!(registered_license(), Some(env.config.ui_license_key.as_str()));

    let app = init_app(env.state.clone(), env.config.clone()).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20240105_000001_init");
}

#[actix_web::test]
async fn test_pages_embed_license_key() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let body = body_text(resp).await;

    assert!(body.contains(&format!(
        r#"<meta name="ui-license" content="{}" />"#,
        env.config.ui_license_key
    )));
}

#[actix_web::test]
async fn test_every_response_carries_request_id() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    for uri in ["/", "/Category", "/nowhere/at/all/here"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert!(header_value(&resp, REQUEST_ID_HEADER).is_some(), "{uri}");
    }
}

#[actix_web::test]
async fn test_development_skips_hsts() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((HOST, "www.budget-wise.net"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(header_value(&resp, STRICT_TRANSPORT_SECURITY.as_str()).is_none());
}

#[actix_web::test]
async fn test_production_adds_hsts_except_on_loopback() {
    let env = TestEnv::with_env(RuntimeEnv::Production).await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((HOST, "www.budget-wise.net"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        header_value(&resp, STRICT_TRANSPORT_SECURITY.as_str())
            .and_then(|v| v.to_str().ok()),
        Some(HSTS_VALUE)
    );

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((HOST, "localhost:5000"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(header_value(&resp, STRICT_TRANSPORT_SECURITY.as_str()).is_none());
}

#[actix_web::test]
async fn test_production_server_errors_show_error_page() {
    let env = TestEnv::with_env(RuntimeEnv::Production).await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let cookie = register(&app, "broken@example.com").await;

    // a missing table turns the transaction list into a database error
    env.state
        .db()
        .expect("test state has a database")
        .execute_unprepared("DROP TABLE transactions")
        .await
        .expect("drop transactions table");

    let req = test::TestRequest::get()
        .uri("/Transaction")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let request_id = header_value(&resp, REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("request id header");
    let body = body_text(resp).await;
    assert!(body.contains("An error occurred while processing your request."));
    assert!(body.contains(&request_id));
    assert!(!body.contains("no such table"));
}

#[actix_web::test]
async fn test_production_error_action_is_not_a_server_error() {
    let env = TestEnv::with_env(RuntimeEnv::Production).await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/Home/Error").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp)
        .await
        .contains("An error occurred while processing your request."));
}

#[actix_web::test]
async fn test_production_keeps_client_errors() {
    let env = TestEnv::with_env(RuntimeEnv::Production).await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/Budget/Forecast").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
