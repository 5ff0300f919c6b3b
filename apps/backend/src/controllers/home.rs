use actix_web::http::StatusCode;
use actix_web::{HttpMessage, HttpRequest, HttpResponse};

use super::{html, signed_in_email};
use crate::error::AppError;
use crate::middleware::request_trace::TraceId;
use crate::views;

pub async fn index(req: &HttpRequest) -> Result<HttpResponse, AppError> {
    Ok(html(StatusCode::OK, views::home(signed_in_email(req).as_deref())))
}

pub async fn privacy(req: &HttpRequest) -> Result<HttpResponse, AppError> {
    Ok(html(StatusCode::OK, views::privacy(signed_in_email(req).as_deref())))
}

/// Generic error page. Served with 200 when requested directly; the
/// production `ErrorPage` stage renders the same page with 500.
pub async fn error(req: &HttpRequest) -> Result<HttpResponse, AppError> {
    let request_id = req
        .extensions()
        .get::<TraceId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    Ok(html(StatusCode::OK, views::error_page(&request_id)))
}
