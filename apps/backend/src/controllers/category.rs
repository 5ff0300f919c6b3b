use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use serde::Deserialize;

use super::{app_state, html, parse_id, read_form, redirect};
use crate::auth::CurrentUser;
use crate::entities::categories::CategoryKind;
use crate::error::AppError;
use crate::infra::db::require_db;
use crate::repos::categories::{self as category_repo, CategoryInput};
use crate::views::{self, CategoryFormView};

const INDEX_PATH: &str = "/Category";
const MAX_TITLE_LEN: usize = 50;
const MAX_ICON_LEN: usize = 5;

#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    #[serde(rename = "CategoryId", default)]
    pub category_id: i32,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Icon", default)]
    pub icon: String,
    #[serde(rename = "Type", default)]
    pub kind: CategoryKind,
}

impl CategoryForm {
    /// Trimmed input, or the message to show next to the form.
    pub fn validate(&self) -> Result<CategoryInput, String> {
        let title = self.title.trim();
        let icon = self.icon.trim();

        if title.is_empty() {
            return Err("Title is required.".to_string());
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(format!("Title cannot exceed {MAX_TITLE_LEN} characters."));
        }
        if icon.chars().count() > MAX_ICON_LEN {
            return Err(format!("Icon cannot exceed {MAX_ICON_LEN} characters."));
        }
        Ok(CategoryInput {
            title: title.to_string(),
            icon: icon.to_string(),
            kind: self.kind,
        })
    }
}

pub async fn index(req: &HttpRequest) -> Result<HttpResponse, AppError> {
    let user = CurrentUser::extract(req).await?;
    let state = app_state(req)?;

    let items = category_repo::list_for_user(require_db(&state)?, &user.id).await?;
    Ok(html(
        StatusCode::OK,
        views::category_index(Some(&user.email), &items),
    ))
}

pub async fn add_or_edit(req: &HttpRequest, id: Option<&str>) -> Result<HttpResponse, AppError> {
    let user = CurrentUser::extract(req).await?;
    let state = app_state(req)?;

    let page = match parse_id(id)? {
        None => views::category_form(
            Some(&user.email),
            &CategoryFormView {
                id: 0,
                title: "",
                icon: "",
                kind: CategoryKind::Expense,
                error: None,
            },
        ),
        Some(id) => {
            let category = category_repo::find_for_user(require_db(&state)?, &user.id, id)
                .await?
                .ok_or_else(|| category_not_found(id))?;
            views::category_form(
                Some(&user.email),
                &CategoryFormView {
                    id: category.id,
                    title: &category.title,
                    icon: &category.icon,
                    kind: category.kind,
                    error: None,
                },
            )
        }
    };
    Ok(html(StatusCode::OK, page))
}

pub async fn save(req: &HttpRequest, payload: &mut Payload) -> Result<HttpResponse, AppError> {
    let user = CurrentUser::extract(req).await?;
    let state = app_state(req)?;
    let form: CategoryForm = read_form(req, payload).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(message) => {
            let page = views::category_form(
                Some(&user.email),
                &CategoryFormView {
                    id: form.category_id,
                    title: &form.title,
                    icon: &form.icon,
                    kind: form.kind,
                    error: Some(&message),
                },
            );
            return Ok(html(StatusCode::BAD_REQUEST, page));
        }
    };

    let db = require_db(&state)?;
    if form.category_id > 0 {
        category_repo::update(db, &user.id, form.category_id, input)
            .await?
            .ok_or_else(|| category_not_found(form.category_id))?;
    } else {
        category_repo::create(db, &user.id, input).await?;
    }
    Ok(redirect(INDEX_PATH))
}

pub async fn delete(req: &HttpRequest, id: Option<&str>) -> Result<HttpResponse, AppError> {
    let user = CurrentUser::extract(req).await?;
    let state = app_state(req)?;

    if let Some(id) = parse_id(id)? {
        category_repo::delete(require_db(&state)?, &user.id, id).await?;
    }
    Ok(redirect(INDEX_PATH))
}

fn category_not_found(id: i32) -> AppError {
    AppError::not_found("CATEGORY_NOT_FOUND", format!("Category {id} not found"))
}
