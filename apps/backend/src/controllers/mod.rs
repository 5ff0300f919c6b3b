//! Conventional-route controllers.
//!
//! Actions are plain async functions over the live request; [`dispatch`]
//! maps a [`RouteMatch`] and HTTP method onto them. Controller and action
//! names compare case-insensitively.

pub mod category;
pub mod dashboard;
pub mod demo_dashboard;
pub mod home;
pub mod transaction;

use actix_web::dev::Payload;
use actix_web::http::header::{self, ContentType};
use actix_web::http::{Method, StatusCode};
use actix_web::{web, FromRequest, HttpMessage, HttpRequest, HttpResponse};
use serde::de::DeserializeOwned;

use crate::auth::claims::SessionClaims;
use crate::error::AppError;
use crate::routing::table::RouteMatch;
use crate::state::app_state::AppState;

pub fn app_state(req: &HttpRequest) -> Result<web::Data<AppState>, AppError> {
    req.app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::internal("Application state is not configured"))
}

/// Email of the signed-in user, for the page shell.
pub fn signed_in_email(req: &HttpRequest) -> Option<String> {
    req.extensions()
        .get::<SessionClaims>()
        .map(|claims| claims.email.clone())
}

pub fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Parse the optional `{id?}` segment. Absent and `0` both mean "new".
pub fn parse_id(id: Option<&str>) -> Result<Option<i32>, AppError> {
    match id {
        None => Ok(None),
        Some(raw) => match raw.parse::<i32>() {
            Ok(0) => Ok(None),
            Ok(value) if value > 0 => Ok(Some(value)),
            _ => Err(AppError::not_found("INVALID_ID", format!("No record with id '{raw}'"))),
        },
    }
}

pub async fn read_form<T: DeserializeOwned + 'static>(
    req: &HttpRequest,
    payload: &mut Payload,
) -> Result<T, AppError> {
    web::Form::<T>::from_request(req, payload)
        .await
        .map(web::Form::into_inner)
        .map_err(|e| AppError::bad_request("INVALID_FORM", e.to_string()))
}

fn action_not_found(m: &RouteMatch) -> AppError {
    AppError::not_found(
        "ACTION_NOT_FOUND",
        format!("No action '{}/{}'", m.controller, m.action),
    )
}

/// Run the action a conventional route resolved to.
pub async fn dispatch(
    m: &RouteMatch,
    req: &HttpRequest,
    payload: &mut Payload,
) -> Result<HttpResponse, AppError> {
    let controller = m.controller.to_ascii_lowercase();
    let action = m.action.to_ascii_lowercase();
    let method = req.method().clone();
    let is_get = method == Method::GET || method == Method::HEAD;
    let is_post = method == Method::POST;
    let id = m.id.as_deref();

    match (controller.as_str(), action.as_str()) {
        ("home", "index") if is_get => home::index(req).await,
        ("home", "privacy") if is_get => home::privacy(req).await,
        ("home", "error") => home::error(req).await,

        ("dashboard", "index") if is_get => dashboard::index(req).await,

        ("category", "index") if is_get => category::index(req).await,
        ("category", "addoredit") if is_get => category::add_or_edit(req, id).await,
        ("category", "addoredit") if is_post => category::save(req, payload).await,
        ("category", "delete") if is_post => category::delete(req, id).await,

        ("transaction", "index") if is_get => transaction::index(req).await,
        ("transaction", "addoredit") if is_get => transaction::add_or_edit(req, id).await,
        ("transaction", "addoredit") if is_post => transaction::save(req, payload).await,
        ("transaction", "delete") if is_post => transaction::delete(req, id).await,

        ("demodashboard", "demo") if is_get => demo_dashboard::demo(req).await,

        _ => Err(action_not_found(m)),
    }
}
