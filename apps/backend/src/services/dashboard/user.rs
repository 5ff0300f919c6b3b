use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::debug;
use uuid::Uuid;

use super::{DashboardService, DateRange, TransactionView};
use crate::error::AppError;
use crate::repos::transactions as txn_repo;

/// Dashboard scoped to one user's data.
///
/// An empty identity is a valid binding (anonymous request); every
/// operation then yields empty results without touching the database.
#[derive(Debug, Clone)]
pub struct UserDashboardService {
    db: Option<DatabaseConnection>,
    user_id: String,
    scope_id: Uuid,
}

impl UserDashboardService {
    pub fn new(db: Option<DatabaseConnection>, user_id: impl Into<String>) -> Self {
        Self {
            db,
            user_id: user_id.into(),
            scope_id: Uuid::new_v4(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn is_anonymous(&self) -> bool {
        self.user_id.is_empty()
    }

    fn conn(&self) -> Result<&DatabaseConnection, AppError> {
        self.db.as_ref().ok_or_else(AppError::db_unavailable)
    }
}

#[async_trait]
impl DashboardService for UserDashboardService {
    fn identity(&self) -> Option<&str> {
        Some(&self.user_id)
    }

    fn scope_id(&self) -> Uuid {
        self.scope_id
    }

    async fn transactions_in(&self, range: DateRange) -> Result<Vec<TransactionView>, AppError> {
        if self.is_anonymous() {
            return Ok(Vec::new());
        }

        let rows = txn_repo::in_range(self.conn()?, &self.user_id, range.start, range.end).await?;
        debug!(user_id = %self.user_id, rows = rows.len(), "dashboard_range_loaded");
        Ok(rows.into_iter().map(TransactionView::from).collect())
    }

    async fn recent_transactions(&self, limit: u64) -> Result<Vec<TransactionView>, AppError> {
        if self.is_anonymous() || limit == 0 {
            return Ok(Vec::new());
        }

        let rows = txn_repo::recent(self.conn()?, &self.user_id, limit).await?;
        Ok(rows.into_iter().map(TransactionView::from).collect())
    }
}
