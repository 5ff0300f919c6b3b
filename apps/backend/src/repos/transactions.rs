use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::Date;

use crate::entities::{categories, transactions};
use crate::error::AppError;

/// A transaction paired with the category it is booked under.
pub type TransactionWithCategory = (transactions::Model, categories::Model);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    pub category_id: i32,
    pub amount: i64,
    pub note: Option<String>,
    pub date: Date,
}

fn pair_with_category(
    rows: Vec<(transactions::Model, Option<categories::Model>)>,
) -> Vec<TransactionWithCategory> {
    // category_id is a non-null FK, the join always yields a category
    rows.into_iter()
        .filter_map(|(txn, category)| category.map(|c| (txn, c)))
        .collect()
}

/// All of a user's transactions, newest first.
pub async fn list_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
) -> Result<Vec<TransactionWithCategory>, AppError> {
    let rows = transactions::Entity::find()
        .find_also_related(categories::Entity)
        .filter(transactions::Column::UserId.eq(user_id))
        .order_by_desc(transactions::Column::Date)
        .order_by_desc(transactions::Column::Id)
        .all(conn)
        .await?;
    Ok(pair_with_category(rows))
}

/// Transactions dated within `[start, end]`, oldest first.
pub async fn in_range<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    start: Date,
    end: Date,
) -> Result<Vec<TransactionWithCategory>, AppError> {
    let rows = transactions::Entity::find()
        .find_also_related(categories::Entity)
        .filter(transactions::Column::UserId.eq(user_id))
        .filter(transactions::Column::Date.between(start, end))
        .order_by_asc(transactions::Column::Date)
        .order_by_asc(transactions::Column::Id)
        .all(conn)
        .await?;
    Ok(pair_with_category(rows))
}

/// The `limit` newest transactions.
pub async fn recent<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    limit: u64,
) -> Result<Vec<TransactionWithCategory>, AppError> {
    let rows = transactions::Entity::find()
        .find_also_related(categories::Entity)
        .filter(transactions::Column::UserId.eq(user_id))
        .order_by_desc(transactions::Column::Date)
        .order_by_desc(transactions::Column::Id)
        .limit(limit)
        .all(conn)
        .await?;
    Ok(pair_with_category(rows))
}

pub async fn find_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    id: i32,
) -> Result<Option<transactions::Model>, AppError> {
    Ok(transactions::Entity::find_by_id(id)
        .filter(transactions::Column::UserId.eq(user_id))
        .one(conn)
        .await?)
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    input: TransactionInput,
) -> Result<transactions::Model, AppError> {
    let model = transactions::ActiveModel {
        id: NotSet,
        user_id: Set(user_id.to_string()),
        category_id: Set(input.category_id),
        amount: Set(input.amount),
        note: Set(input.note),
        date: Set(input.date),
    };
    Ok(model.insert(conn).await?)
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    id: i32,
    input: TransactionInput,
) -> Result<Option<transactions::Model>, AppError> {
    let Some(existing) = find_for_user(conn, user_id, id).await? else {
        return Ok(None);
    };

    let mut model: transactions::ActiveModel = existing.into();
    model.category_id = Set(input.category_id);
    model.amount = Set(input.amount);
    model.note = Set(input.note);
    model.date = Set(input.date);
    Ok(Some(model.update(conn).await?))
}

pub async fn delete<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    id: i32,
) -> Result<bool, AppError> {
    let result = transactions::Entity::delete_many()
        .filter(transactions::Column::Id.eq(id))
        .filter(transactions::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}
