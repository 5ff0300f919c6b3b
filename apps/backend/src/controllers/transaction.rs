use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use super::{app_state, html, parse_id, read_form, redirect};
use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::infra::db::require_db;
use crate::repos::categories as category_repo;
use crate::repos::transactions::{self as txn_repo, TransactionInput};
use crate::services::dashboard::TransactionView;
use crate::views::{self, TransactionFormView};

const INDEX_PATH: &str = "/Transaction";
const MAX_NOTE_LEN: usize = 75;
/// Largest accepted amount; keeps dashboard sums well inside `i64`.
pub const MAX_AMOUNT: i64 = i32::MAX as i64;

#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    #[serde(rename = "TransactionId", default)]
    pub transaction_id: i32,
    #[serde(rename = "CategoryId", default)]
    pub category_id: i32,
    #[serde(rename = "Amount", default)]
    pub amount: i64,
    #[serde(rename = "Note", default)]
    pub note: Option<String>,
    #[serde(rename = "Date", default)]
    pub date: String,
}

pub fn parse_date(raw: &str) -> Result<Date, time::error::Parse> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
}

impl TransactionForm {
    /// Checks that need no database. An empty date means today.
    pub fn validate(&self, today: Date) -> Result<TransactionInput, String> {
        if self.category_id <= 0 {
            return Err("Please select a category.".to_string());
        }
        if self.amount <= 0 {
            return Err("Amount should be greater than 0.".to_string());
        }
        if self.amount > MAX_AMOUNT {
            return Err(format!("Amount cannot exceed {MAX_AMOUNT}."));
        }

        let note = self
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        if note.as_deref().is_some_and(|n| n.chars().count() > MAX_NOTE_LEN) {
            return Err(format!("Note cannot exceed {MAX_NOTE_LEN} characters."));
        }

        let date = if self.date.trim().is_empty() {
            today
        } else {
            parse_date(&self.date).map_err(|_| "Date must be in YYYY-MM-DD format.".to_string())?
        };

        Ok(TransactionInput {
            category_id: self.category_id,
            amount: self.amount,
            note,
            date,
        })
    }
}

pub async fn index(req: &HttpRequest) -> Result<HttpResponse, AppError> {
    let user = CurrentUser::extract(req).await?;
    let state = app_state(req)?;

    let txns: Vec<TransactionView> = txn_repo::list_for_user(require_db(&state)?, &user.id)
        .await?
        .into_iter()
        .map(TransactionView::from)
        .collect();
    Ok(html(
        StatusCode::OK,
        views::transaction_index(Some(&user.email), &txns),
    ))
}

async fn render_form(
    db: &DatabaseConnection,
    user: &CurrentUser,
    status: StatusCode,
    form: &TransactionForm,
    error: Option<&str>,
) -> Result<HttpResponse, AppError> {
    let categories = category_repo::list_for_user(db, &user.id).await?;
    let page = views::transaction_form(
        Some(&user.email),
        &TransactionFormView {
            id: form.transaction_id,
            category_id: form.category_id,
            amount: form.amount,
            note: form.note.as_deref().unwrap_or_default(),
            date: form.date.clone(),
            categories: &categories,
            error,
        },
    );
    Ok(html(status, page))
}

pub async fn add_or_edit(req: &HttpRequest, id: Option<&str>) -> Result<HttpResponse, AppError> {
    let user = CurrentUser::extract(req).await?;
    let state = app_state(req)?;
    let db = require_db(&state)?;

    let form = match parse_id(id)? {
        None => TransactionForm {
            transaction_id: 0,
            category_id: 0,
            amount: 0,
            note: None,
            date: OffsetDateTime::now_utc().date().to_string(),
        },
        Some(id) => {
            let txn = txn_repo::find_for_user(db, &user.id, id)
                .await?
                .ok_or_else(|| transaction_not_found(id))?;
            TransactionForm {
                transaction_id: txn.id,
                category_id: txn.category_id,
                amount: txn.amount,
                note: txn.note,
                date: txn.date.to_string(),
            }
        }
    };
    render_form(db, &user, StatusCode::OK, &form, None).await
}

pub async fn save(req: &HttpRequest, payload: &mut Payload) -> Result<HttpResponse, AppError> {
    let user = CurrentUser::extract(req).await?;
    let state = app_state(req)?;
    let db = require_db(&state)?;
    let form: TransactionForm = read_form(req, payload).await?;

    let input = match form.validate(OffsetDateTime::now_utc().date()) {
        Ok(input) => input,
        Err(message) => {
            return render_form(db, &user, StatusCode::BAD_REQUEST, &form, Some(&message)).await
        }
    };

    // the category must be one of the user's own
    if category_repo::find_for_user(db, &user.id, input.category_id)
        .await?
        .is_none()
    {
        return render_form(
            db,
            &user,
            StatusCode::BAD_REQUEST,
            &form,
            Some("Please select a category."),
        )
        .await;
    }

    if form.transaction_id > 0 {
        txn_repo::update(db, &user.id, form.transaction_id, input)
            .await?
            .ok_or_else(|| transaction_not_found(form.transaction_id))?;
    } else {
        txn_repo::create(db, &user.id, input).await?;
    }
    Ok(redirect(INDEX_PATH))
}

pub async fn delete(req: &HttpRequest, id: Option<&str>) -> Result<HttpResponse, AppError> {
    let user = CurrentUser::extract(req).await?;
    let state = app_state(req)?;

    if let Some(id) = parse_id(id)? {
        txn_repo::delete(require_db(&state)?, &user.id, id).await?;
    }
    Ok(redirect(INDEX_PATH))
}

fn transaction_not_found(id: i32) -> AppError {
    AppError::not_found("TRANSACTION_NOT_FOUND", format!("Transaction {id} not found"))
}
