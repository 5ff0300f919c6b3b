//! Per-request dashboard binding.
//!
//! `resolve_dashboard` is the factory: a pure function of the request
//! context. `ScopedDashboard` is the extractor handlers use; it resolves at
//! most once per request and caches the binding in request extensions.

use std::future::{ready, Ready};
use std::ops::Deref;
use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use sea_orm::DatabaseConnection;
use time::OffsetDateTime;

use super::demo::DemoDashboardService;
use super::user::UserDashboardService;
use crate::error::AppError;
use crate::request_context::RequestContext;
use crate::state::app_state::AppState;

/// Build the binding for a request.
///
/// Anonymous requests get a user-bound binding with an empty identity,
/// which answers every operation with empty data. No I/O happens here.
pub fn resolve_dashboard(
    ctx: &RequestContext,
    db: Option<DatabaseConnection>,
) -> UserDashboardService {
    UserDashboardService::new(db, ctx.identity_or_empty())
}

/// Demo binding anchored at today's date (UTC).
pub fn demo_dashboard() -> DemoDashboardService {
    DemoDashboardService::new(OffsetDateTime::now_utc().date())
}

/// The request's dashboard binding.
#[derive(Debug, Clone)]
pub struct ScopedDashboard(Arc<UserDashboardService>);

impl ScopedDashboard {
    pub fn service(&self) -> &UserDashboardService {
        &self.0
    }
}

impl Deref for ScopedDashboard {
    type Target = UserDashboardService;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for ScopedDashboard {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let cached = req.extensions().get::<ScopedDashboard>().cloned();
        if let Some(existing) = cached {
            return ready(Ok(existing));
        }

        let db = req
            .app_data::<web::Data<AppState>>()
            .and_then(|state| state.db().cloned());
        let ctx = RequestContext::from_http_request(req);

        let scoped = ScopedDashboard(Arc::new(resolve_dashboard(&ctx, db)));
        req.extensions_mut().insert(scoped.clone());
        ready(Ok(scoped))
    }
}
