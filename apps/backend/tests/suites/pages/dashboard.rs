use actix_web::http::StatusCode;
use budgetwise::repos::categories as category_repo;

use crate::common::body_text;
use crate::support::app::{init_app, TestEnv};
use crate::support::auth::{register, user_id};
use crate::support::forms::{create_category, create_transaction, get_as};

#[actix_web::test]
async fn test_dashboard_summarizes_own_recent_week() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let cookie = register(&app, "owner@example.com").await;
    let owner = user_id(&cookie, &env.state.security);
    let db = env.state.db().expect("test state has a database");

    create_category(&app, &cookie, "Salary", "💼", "Income").await;
    create_category(&app, &cookie, "Food", "🍔", "Expense").await;
    let categories = category_repo::list_for_user(db, &owner).await.unwrap();
    let id_of = |title: &str| {
        categories
            .iter()
            .find(|c| c.title == title)
            .map(|c| c.id)
            .expect("category exists")
    };

    create_transaction(&app, &cookie, id_of("Salary"), 3000, "March pay", "").await;
    create_transaction(&app, &cookie, id_of("Food"), 42, "Lunch", "").await;
    // long before the default seven-day window
    create_transaction(&app, &cookie, id_of("Food"), 999, "Old feast", "2020-01-01").await;

    let resp = get_as(&app, &cookie, "/Dashboard").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;

    assert!(body.contains("<h1>Dashboard</h1>"));
    assert!(body.contains("Total Income <strong>$3,000</strong>"));
    assert!(body.contains("Total Expense <strong>$42</strong>"));
    assert!(body.contains("Balance <strong>$2,958</strong>"));
    assert!(body.contains(&format!(r#""identity":"{owner}""#)));
    assert!(body.contains("Lunch"));
}

#[actix_web::test]
async fn test_dashboard_range_follows_days_query() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let cookie = register(&app, "ranges@example.com").await;

    let resp = get_as(&app, &cookie, "/Dashboard?days=30").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = get_as(&app, &cookie, "/Dashboard?days=400").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = get_as(&app, &cookie, "/Dashboard?days=soon").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_dashboard_is_scoped_to_the_requesting_user() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let alice = register(&app, "alice@example.com").await;
    let bob = register(&app, "bob@example.com").await;
    let db = env.state.db().expect("test state has a database");

    create_category(&app, &alice, "Salary", "", "Income").await;
    let alice_id = user_id(&alice, &env.state.security);
    let category = category_repo::list_for_user(db, &alice_id).await.unwrap()[0].id;
    create_transaction(&app, &alice, category, 5000, "Bonus", "").await;

    let body = body_text(get_as(&app, &bob, "/Dashboard").await).await;
    let bob_id = user_id(&bob, &env.state.security);

    assert!(body.contains("Total Income <strong>$0</strong>"));
    assert!(!body.contains("Bonus"));
    assert!(body.contains(&format!(r#""identity":"{bob_id}""#)));
    assert!(!body.contains(&alice_id));
}

#[actix_web::test]
async fn test_demo_dashboard_ignores_signed_in_user_data() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let cookie = register(&app, "curious@example.com").await;

    let resp = get_as(&app, &cookie, "/DemoDashboard/Demo").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;

    assert!(body.contains("<h1>Demo Dashboard</h1>"));
    assert!(body.contains(r#""identity":null"#));
    // the shell still shows who is signed in
    assert!(body.contains("curious@example.com"));
}
