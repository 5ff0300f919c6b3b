//! Terminal service of the pipeline: runs the endpoint the route table
//! resolved for the request.

use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, HttpRequest, HttpResponse};

use super::table::{ResolvedEndpoint, RouteTable};
use crate::config::cookies::LOGIN_PATH;
use crate::controllers;
use crate::error::AppError;
use crate::logging::security;
use crate::middleware::authorization::{login_challenge, AccessDecision};
use crate::routes;
use crate::state::app_state::AppState;

/// Used as the application's default service.
pub async fn dispatch(req: ServiceRequest) -> Result<ServiceResponse, Error> {
    let (http_req, mut payload) = req.into_parts();
    let response = run(&http_req, &mut payload)
        .await
        .unwrap_or_else(|e| HttpResponse::from_error(e));
    Ok(ServiceResponse::new(http_req, response))
}

async fn run(req: &HttpRequest, payload: &mut Payload) -> Result<HttpResponse, AppError> {
    let resolved = req.extensions().get::<ResolvedEndpoint>().cloned();
    let endpoint = resolved
        .or_else(|| RouteTable::standard().resolve(req.path()))
        .ok_or_else(|| {
            AppError::not_found("ROUTE_NOT_FOUND", format!("No route matches '{}'", req.path()))
        })?;

    let decision = req.extensions().get::<AccessDecision>().copied();
    if decision == Some(AccessDecision::Challenge) {
        security::login_redirect(req.path());
        let login_path = req
            .app_data::<actix_web::web::Data<AppState>>()
            .map(|state| state.session_cookie.login_path.clone())
            .unwrap_or_else(|| LOGIN_PATH.to_string());
        return Ok(login_challenge(&login_path));
    }

    match endpoint {
        ResolvedEndpoint::Page(page) => routes::dispatch(page, req, payload).await,
        ResolvedEndpoint::Controller(m) => controllers::dispatch(&m, req, payload).await,
    }
}
