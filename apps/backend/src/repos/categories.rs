use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::categories::{self, CategoryKind};
use crate::error::AppError;

/// Fields a user may set on a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub title: String,
    pub icon: String,
    pub kind: CategoryKind,
}

pub async fn list_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
) -> Result<Vec<categories::Model>, AppError> {
    Ok(categories::Entity::find()
        .filter(categories::Column::UserId.eq(user_id))
        .order_by_asc(categories::Column::Title)
        .all(conn)
        .await?)
}

pub async fn find_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    id: i32,
) -> Result<Option<categories::Model>, AppError> {
    Ok(categories::Entity::find_by_id(id)
        .filter(categories::Column::UserId.eq(user_id))
        .one(conn)
        .await?)
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    input: CategoryInput,
) -> Result<categories::Model, AppError> {
    let model = categories::ActiveModel {
        id: NotSet,
        user_id: Set(user_id.to_string()),
        title: Set(input.title),
        icon: Set(input.icon),
        kind: Set(input.kind),
    };
    Ok(model.insert(conn).await?)
}

/// Update a category the user owns; `None` when it does not exist for them.
pub async fn update<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    id: i32,
    input: CategoryInput,
) -> Result<Option<categories::Model>, AppError> {
    let Some(existing) = find_for_user(conn, user_id, id).await? else {
        return Ok(None);
    };

    let mut model: categories::ActiveModel = existing.into();
    model.title = Set(input.title);
    model.icon = Set(input.icon);
    model.kind = Set(input.kind);
    Ok(Some(model.update(conn).await?))
}

/// Delete a category the user owns. Returns whether a row was removed.
pub async fn delete<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    id: i32,
) -> Result<bool, AppError> {
    let result = categories::Entity::delete_many()
        .filter(categories::Column::Id.eq(id))
        .filter(categories::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}
