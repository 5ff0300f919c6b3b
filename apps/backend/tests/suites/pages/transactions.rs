use actix_web::http::StatusCode;
use budgetwise::repos::categories as category_repo;
use budgetwise::repos::transactions as txn_repo;
use time::macros::date;
use time::OffsetDateTime;

use crate::common::{body_text, location};
use crate::support::app::{init_app, TestEnv};
use crate::support::auth::{register, user_id};
use crate::support::forms::{create_category, create_transaction, get_as, post_form};

#[actix_web::test]
async fn test_create_edit_and_delete_transaction() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let cookie = register(&app, "spender@example.com").await;
    let owner = user_id(&cookie, &env.state.security);
    let db = env.state.db().expect("test state has a database");

    create_category(&app, &cookie, "Food", "🍔", "Expense").await;
    let category = category_repo::list_for_user(db, &owner).await.unwrap()[0].id;

    let resp = create_transaction(&app, &cookie, category, 1250, "Weekly shop", "2024-03-05").await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/Transaction");

    let stored = txn_repo::list_for_user(db, &owner).await.unwrap();
    assert_eq!(stored.len(), 1);
    let (txn, cat) = &stored[0];
    assert_eq!(txn.amount, 1250);
    assert_eq!(txn.note.as_deref(), Some("Weekly shop"));
    assert_eq!(txn.date, date!(2024 - 03 - 05));
    assert_eq!(cat.title, "Food");

    let body = body_text(get_as(&app, &cookie, "/Transaction").await).await;
    assert!(body.contains("Weekly shop"));
    assert!(body.contains("$1,250"));

    let id = txn.id.to_string();
    let category = category.to_string();
    let resp = post_form(
        &app,
        &cookie,
        "/Transaction/AddOrEdit",
        &[
            ("TransactionId", id.as_str()),
            ("CategoryId", category.as_str()),
            ("Amount", "900"),
            ("Note", ""),
            ("Date", "2024-03-06"),
        ],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let (txn, _) = txn_repo::list_for_user(db, &owner).await.unwrap().remove(0);
    assert_eq!(txn.amount, 900);
    assert_eq!(txn.note, None);
    assert_eq!(txn.date, date!(2024 - 03 - 06));

    let resp = get_as(&app, &cookie, &format!("/Transaction/AddOrEdit/{id}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Edit Transaction"));
    assert!(body.contains(r#"value="2024-03-06""#));

    let resp = post_form(&app, &cookie, &format!("/Transaction/Delete/{id}"), &[]).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(txn_repo::list_for_user(db, &owner).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_empty_date_means_today() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let cookie = register(&app, "today@example.com").await;
    let owner = user_id(&cookie, &env.state.security);
    let db = env.state.db().expect("test state has a database");

    create_category(&app, &cookie, "Food", "", "Expense").await;
    let category = category_repo::list_for_user(db, &owner).await.unwrap()[0].id;

    let before = OffsetDateTime::now_utc().date();
    let resp = create_transaction(&app, &cookie, category, 5, "", "").await;
    let after = OffsetDateTime::now_utc().date();
    assert_eq!(resp.status(), StatusCode::FOUND);

    let (txn, _) = txn_repo::list_for_user(db, &owner).await.unwrap().remove(0);
    assert!(txn.date == before || txn.date == after);
}

#[actix_web::test]
async fn test_invalid_transaction_is_shown_again() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let cookie = register(&app, "oops@example.com").await;
    let owner = user_id(&cookie, &env.state.security);
    let db = env.state.db().expect("test state has a database");

    create_category(&app, &cookie, "Food", "", "Expense").await;
    let category = category_repo::list_for_user(db, &owner).await.unwrap()[0].id;

    let cases = [
        (0, 10, "2024-03-05", "Please select a category."),
        (category, 0, "2024-03-05", "Amount should be greater than 0."),
        (category, 10, "05/03/2024", "Date must be in YYYY-MM-DD format."),
    ];
    for (category_id, amount, date, message) in cases {
        let resp = create_transaction(&app, &cookie, category_id, amount, "", date).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{message}");
        let body = body_text(resp).await;
        assert!(body.contains(message), "{message}");
        // the category select is still populated
        assert!(body.contains(&format!(r#"<option value="{category}""#)));
    }

    assert!(txn_repo::list_for_user(db, &owner).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_cannot_book_against_another_users_category() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let alice = register(&app, "alice@example.com").await;
    let mallory = register(&app, "mallory@example.com").await;
    let db = env.state.db().expect("test state has a database");

    create_category(&app, &alice, "Rent", "", "Expense").await;
    let alice_id = user_id(&alice, &env.state.security);
    let category = category_repo::list_for_user(db, &alice_id).await.unwrap()[0].id;

    let resp = create_transaction(&app, &mallory, category, 10, "", "2024-03-05").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let mallory_id = user_id(&mallory, &env.state.security);
    assert!(txn_repo::list_for_user(db, &mallory_id).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_other_users_transaction_is_not_found() {
    let env = TestEnv::new().await;
    let app = init_app(env.state.clone(), env.config.clone()).await;
    let alice = register(&app, "alice@example.com").await;
    let bob = register(&app, "bob@example.com").await;
    let db = env.state.db().expect("test state has a database");
    let alice_id = user_id(&alice, &env.state.security);

    create_category(&app, &alice, "Food", "", "Expense").await;
    let category = category_repo::list_for_user(db, &alice_id).await.unwrap()[0].id;
    create_transaction(&app, &alice, category, 10, "", "2024-03-05").await;
    let (txn, _) = txn_repo::list_for_user(db, &alice_id).await.unwrap().remove(0);

    let resp = get_as(&app, &bob, &format!("/Transaction/AddOrEdit/{}", txn.id)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    post_form(&app, &bob, &format!("/Transaction/Delete/{}", txn.id), &[]).await;
    assert_eq!(txn_repo::list_for_user(db, &alice_id).await.unwrap().len(), 1);
}
