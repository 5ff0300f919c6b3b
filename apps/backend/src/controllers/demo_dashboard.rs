use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use time::OffsetDateTime;

use super::dashboard::parse_query;
use super::{html, signed_in_email};
use crate::error::AppError;
use crate::services::dashboard::{demo_dashboard, DashboardService, DEFAULT_RECENT_LIMIT};
use crate::views;

/// Public demo; served from sample data whether or not anyone is signed in.
pub async fn demo(req: &HttpRequest) -> Result<HttpResponse, AppError> {
    let range = parse_query(req)?.range_ending(OffsetDateTime::now_utc().date())?;
    let snapshot = demo_dashboard()
        .snapshot(range, DEFAULT_RECENT_LIMIT)
        .await?;

    Ok(html(
        StatusCode::OK,
        views::dashboard("Demo Dashboard", signed_in_email(req).as_deref(), &snapshot),
    ))
}
