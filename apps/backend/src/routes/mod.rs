//! Endpoints outside the conventional routes: account pages and health.

pub mod health;
pub mod identity;

use actix_web::dev::Payload;
use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse};

use crate::error::AppError;
use crate::routing::table::PageEndpoint;

pub async fn dispatch(
    page: PageEndpoint,
    req: &HttpRequest,
    payload: &mut Payload,
) -> Result<HttpResponse, AppError> {
    let method = req.method().clone();
    let is_get = method == Method::GET || method == Method::HEAD;
    let is_post = method == Method::POST;

    match page {
        PageEndpoint::Login if is_get => identity::login_page().await,
        PageEndpoint::Login if is_post => identity::login(req, payload).await,
        PageEndpoint::Register if is_get => identity::register_page().await,
        PageEndpoint::Register if is_post => identity::register(req, payload).await,
        PageEndpoint::Logout if is_post => identity::logout(req).await,
        PageEndpoint::Health if is_get => health::health(req).await,
        _ => Err(AppError::not_found(
            "PAGE_NOT_FOUND",
            format!("{method} {} is not handled", req.path()),
        )),
    }
}
