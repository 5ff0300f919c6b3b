use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details;
use budgetwise::entities::categories::CategoryKind;
use budgetwise::repos::categories as category_repo;

use crate::common::{body_text, location};
use crate::support::app::{init_app, TestEnv};
use crate::support::auth::{register, user_id};
use crate::support::forms::{create_category, get_as, post_form};

#[actix_web::test]
async fn test_create_edit_and_delete_category() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let cookie = register(&app, "cats@example.com").await;
    let owner = user_id(&cookie, &env.state.security);
    let db = env.state.db().expect("test state has a database");

    let resp = create_category(&app, &cookie, "Groceries", "🛒", "Expense").await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/Category");

    let stored = category_repo::list_for_user(db, &owner).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Groceries");
    assert_eq!(stored[0].kind, CategoryKind::Expense);
    let id = stored[0].id.to_string();

    let body = body_text(get_as(&app, &cookie, "/Category").await).await;
    assert!(body.contains("Groceries"));

    let resp = post_form(
        &app,
        &cookie,
        "/Category/AddOrEdit",
        &[
            ("CategoryId", id.as_str()),
            ("Title", "Salary"),
            ("Icon", "💼"),
            ("Type", "Income"),
        ],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let resp = get_as(&app, &cookie, &format!("/Category/AddOrEdit/{id}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Edit Category"));
    assert!(body.contains(r#"value="Salary""#));
    assert!(body.contains(r#"value="Income" checked"#));

    let resp = post_form(&app, &cookie, &format!("/Category/Delete/{id}"), &[]).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(category_repo::list_for_user(db, &owner)
        .await
        .unwrap()
        .is_empty());
}

#[actix_web::test]
async fn test_new_category_form() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let cookie = register(&app, "form@example.com").await;

    for uri in ["/Category/AddOrEdit", "/Category/AddOrEdit/0"] {
        let resp = get_as(&app, &cookie, uri).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        assert!(body_text(resp).await.contains("Create a new Category"));
    }
}

#[actix_web::test]
async fn test_invalid_category_is_shown_again() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let cookie = register(&app, "invalid@example.com").await;

    let resp = create_category(&app, &cookie, "   ", "", "Expense").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("Title is required."));

    let long_icon = create_category(&app, &cookie, "Travel", "abcdef", "Expense").await;
    assert_eq!(long_icon.status(), StatusCode::BAD_REQUEST);

    let owner = user_id(&cookie, &env.state.security);
    let db = env.state.db().expect("test state has a database");
    assert!(category_repo::list_for_user(db, &owner)
        .await
        .unwrap()
        .is_empty());
}

#[actix_web::test]
async fn test_categories_are_private_to_their_owner() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let alice = register(&app, "alice@example.com").await;
    let bob = register(&app, "bob@example.com").await;
    let db = env.state.db().expect("test state has a database");

    create_category(&app, &alice, "Rent", "🏠", "Expense").await;
    let alice_id = user_id(&alice, &env.state.security);
    let id = category_repo::list_for_user(db, &alice_id).await.unwrap()[0]
        .id
        .to_string();

    // bob sees an empty list and cannot open alice's category
    let body = body_text(get_as(&app, &bob, "/Category").await).await;
    assert!(!body.contains("Rent"));

    let resp = get_as(&app, &bob, &format!("/Category/AddOrEdit/{id}")).await;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_problem_details(
        status,
        &headers,
        &body,
        "CATEGORY_NOT_FOUND",
        StatusCode::NOT_FOUND,
    );

    // editing or deleting it changes nothing
    let resp = post_form(
        &app,
        &bob,
        "/Category/AddOrEdit",
        &[
            ("CategoryId", id.as_str()),
            ("Title", "Mine now"),
            ("Icon", ""),
            ("Type", "Expense"),
        ],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    post_form(&app, &bob, &format!("/Category/Delete/{id}"), &[]).await;
    let remaining = category_repo::list_for_user(db, &alice_id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "Rent");
}

#[actix_web::test]
async fn test_malformed_id_is_not_found() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let cookie = register(&app, "ids@example.com").await;

    for uri in ["/Category/AddOrEdit/abc", "/Category/AddOrEdit/-2"] {
        let resp = get_as(&app, &cookie, uri).await;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = test::read_body(resp).await;
        assert_problem_details(status, &headers, &body, "INVALID_ID", StatusCode::NOT_FOUND);
    }
}
