//! Account pages: sign in, register, sign out.

use std::time::SystemTime;

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth::session::mint_session_token;
use crate::controllers::{app_state, html, read_form, redirect};
use crate::entities::users::Model as User;
use crate::error::AppError;
use crate::infra::db::require_db;
use crate::services::users;
use crate::state::app_state::AppState;
use crate::views;

/// Where a successful sign-in or sign-out lands.
const HOME_PATH: &str = "/";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "Password", default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "Password", default)]
    pub password: String,
    #[serde(rename = "ConfirmPassword", default)]
    pub confirm_password: String,
}

/// Redirect home carrying a fresh session cookie for `user`.
fn signed_in_response(state: &AppState, user: &User) -> Result<HttpResponse, AppError> {
    let options = &state.session_cookie;
    let token = mint_session_token(
        &user.id,
        &user.email,
        SystemTime::now(),
        options.lifetime,
        &state.security,
    )?;

    let mut response = redirect(HOME_PATH);
    response
        .add_cookie(&options.issue(token))
        .map_err(|e| AppError::internal(format!("Failed to set session cookie: {e}")))?;
    Ok(response)
}

/// Re-render a form page for errors the user can fix; anything else
/// propagates.
fn form_error(err: AppError, render: impl FnOnce(&str) -> String) -> Result<HttpResponse, AppError> {
    let detail = match &err {
        AppError::Validation { detail, .. }
        | AppError::BadRequest { detail, .. }
        | AppError::Conflict { detail, .. } => Some(detail.clone()),
        _ => None,
    };
    match detail {
        Some(detail) => Ok(html(err.status(), render(&detail))),
        None => Err(err),
    }
}

pub async fn login_page() -> Result<HttpResponse, AppError> {
    Ok(html(StatusCode::OK, views::login("", None)))
}

pub async fn login(req: &HttpRequest, payload: &mut Payload) -> Result<HttpResponse, AppError> {
    let state = app_state(req)?;
    let form: LoginForm = read_form(req, payload).await?;

    match users::sign_in(require_db(&state)?, &form.email, &form.password).await {
        Ok(user) => signed_in_response(&state, &user),
        Err(e) => form_error(e, |message| views::login(&form.email, Some(message))),
    }
}

pub async fn register_page() -> Result<HttpResponse, AppError> {
    Ok(html(StatusCode::OK, views::register("", None)))
}

/// Accounts need no confirmation, so registering also signs in.
pub async fn register(req: &HttpRequest, payload: &mut Payload) -> Result<HttpResponse, AppError> {
    let state = app_state(req)?;
    let form: RegisterForm = read_form(req, payload).await?;

    if form.password != form.confirm_password {
        return Ok(html(
            StatusCode::BAD_REQUEST,
            views::register(
                &form.email,
                Some("The password and confirmation password do not match."),
            ),
        ));
    }

    let registered = users::register(
        require_db(&state)?,
        &form.email,
        &form.password,
        &state.passwords,
    )
    .await;

    match registered {
        Ok(user) => signed_in_response(&state, &user),
        Err(e) => form_error(e, |message| views::register(&form.email, Some(message))),
    }
}

pub async fn logout(req: &HttpRequest) -> Result<HttpResponse, AppError> {
    let state = app_state(req)?;

    let mut response = redirect(HOME_PATH);
    response
        .add_cookie(&state.session_cookie.removal())
        .map_err(|e| AppError::internal(format!("Failed to clear session cookie: {e}")))?;
    Ok(response)
}
