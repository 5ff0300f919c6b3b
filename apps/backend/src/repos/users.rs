use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::users;
use crate::error::AppError;

/// Canonical form used for uniqueness and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_uppercase()
}

pub async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, AppError> {
    Ok(users::Entity::find()
        .filter(users::Column::NormalizedEmail.eq(normalize_email(email)))
        .one(conn)
        .await?)
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> Result<Option<users::Model>, AppError> {
    Ok(users::Entity::find_by_id(id.to_string()).one(conn).await?)
}

pub async fn create_user<C: ConnectionTrait>(
    conn: &C,
    email: &str,
    password_hash: &str,
) -> Result<users::Model, AppError> {
    let now = OffsetDateTime::now_utc();
    let user = users::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        email: Set(email.trim().to_string()),
        normalized_email: Set(normalize_email(email)),
        password_hash: Set(password_hash.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(user.insert(conn).await?)
}
