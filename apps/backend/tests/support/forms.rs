use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};

/// POST a form as the signed-in user.
pub async fn post_form<S, B>(
    app: &S,
    cookie: &Cookie<'static>,
    uri: &str,
    fields: &[(&str, &str)],
) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .set_form(fields)
        .to_request();
    test::call_service(app, req).await
}

/// GET as the signed-in user.
pub async fn get_as<S, B>(app: &S, cookie: &Cookie<'static>, uri: &str) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
{
    let req = test::TestRequest::get()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request();
    test::call_service(app, req).await
}

pub async fn create_category<S, B>(
    app: &S,
    cookie: &Cookie<'static>,
    title: &str,
    icon: &str,
    kind: &str,
) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
{
    post_form(
        app,
        cookie,
        "/Category/AddOrEdit",
        &[
            ("CategoryId", "0"),
            ("Title", title),
            ("Icon", icon),
            ("Type", kind),
        ],
    )
    .await
}

pub async fn create_transaction<S, B>(
    app: &S,
    cookie: &Cookie<'static>,
    category_id: i32,
    amount: i64,
    note: &str,
    date: &str,
) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
{
    let category_id = category_id.to_string();
    let amount = amount.to_string();
    post_form(
        app,
        cookie,
        "/Transaction/AddOrEdit",
        &[
            ("TransactionId", "0"),
            ("CategoryId", category_id.as_str()),
            ("Amount", amount.as_str()),
            ("Note", note),
            ("Date", date),
        ],
    )
    .await
}
