use actix_web::http::StatusCode;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse};
use serde::Deserialize;
use time::OffsetDateTime;

use super::{html, signed_in_email};
use crate::error::AppError;
use crate::services::dashboard::{
    DashboardService, DateRange, ScopedDashboard, DEFAULT_RANGE_DAYS, DEFAULT_RECENT_LIMIT,
};
use crate::views;

const MAX_RANGE_DAYS: u16 = 366;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Length of the range ending today.
    pub days: Option<u16>,
}

impl DashboardQuery {
    pub fn range_ending(&self, today: time::Date) -> Result<DateRange, AppError> {
        let days = self.days.unwrap_or(DEFAULT_RANGE_DAYS);
        if days == 0 || days > MAX_RANGE_DAYS {
            return Err(AppError::invalid(
                "INVALID_RANGE",
                format!("days must be between 1 and {MAX_RANGE_DAYS}"),
            ));
        }
        Ok(DateRange::last_days(today, days))
    }
}

pub fn parse_query(req: &HttpRequest) -> Result<DashboardQuery, AppError> {
    web::Query::<DashboardQuery>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .map_err(|e| AppError::bad_request("INVALID_QUERY", e.to_string()))
}

pub async fn index(req: &HttpRequest) -> Result<HttpResponse, AppError> {
    let range = parse_query(req)?.range_ending(OffsetDateTime::now_utc().date())?;
    let dashboard = ScopedDashboard::extract(req).await?;

    let snapshot = dashboard.snapshot(range, DEFAULT_RECENT_LIMIT).await?;
    Ok(html(
        StatusCode::OK,
        views::dashboard("Dashboard", signed_in_email(req).as_deref(), &snapshot),
    ))
}
