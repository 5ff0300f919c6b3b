use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details;

use crate::common::body_text;
use crate::support::app::{init_app, TestEnv};
use crate::support::auth::register;

#[actix_web::test]
async fn test_root_uses_default_controller_and_action() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("<h1>BudgetWise</h1>"));
    assert!(body.contains("<title>Home - BudgetWise</title>"));
}

#[actix_web::test]
async fn test_controller_and_action_are_case_insensitive() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    for uri in ["/Home/Privacy", "/home/privacy", "/HOME/PRIVACY/"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        assert!(body_text(resp).await.contains("Privacy Policy"));
    }
}

#[actix_web::test]
async fn test_dashboard_route_accepts_optional_id() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let cookie = register(&app, "routes@example.com").await;

    for uri in ["/Dashboard", "/Dashboard/Index", "/Dashboard/Index/7"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    }
}

#[actix_web::test]
async fn test_demo_dashboard_is_public() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/DemoDashboard").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("<h1>Demo Dashboard</h1>"));
    assert!(body.contains(r#"<script id="dashboard-data" type="application/json">"#));
    assert!(body.contains(r#""identity":null"#));
}

#[actix_web::test]
async fn test_unknown_controller_is_not_found() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/Budget/Forecast").to_request(),
    )
    .await;

    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_problem_details(
        status,
        &headers,
        &body,
        "ACTION_NOT_FOUND",
        StatusCode::NOT_FOUND,
    );
}

#[actix_web::test]
async fn test_too_many_segments_match_no_route() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/Home/Index/1/extra").to_request(),
    )
    .await;

    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_problem_details(
        status,
        &headers,
        &body,
        "ROUTE_NOT_FOUND",
        StatusCode::NOT_FOUND,
    );
}

#[actix_web::test]
async fn test_wrong_method_is_not_found() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/Home/Privacy").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_error_action_renders_error_page() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/Home/Error").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp)
        .await
        .contains("An error occurred while processing your request."));
}

#[actix_web::test]
async fn test_invalid_dashboard_range_is_rejected() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/DemoDashboard?days=0").to_request(),
    )
    .await;

    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_problem_details(
        status,
        &headers,
        &body,
        "INVALID_RANGE",
        StatusCode::BAD_REQUEST,
    );
}
