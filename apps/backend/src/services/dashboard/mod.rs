//! Dashboard data service and its per-request bindings.
//!
//! A binding is either user-bound ([`UserDashboardService`]) or the demo
//! ([`DemoDashboardService`]). Aggregation is shared: bindings only supply
//! transactions, the trait's provided methods fold them.

pub mod demo;
pub mod resolver;
pub mod user;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use time::{Date, Duration};
use uuid::Uuid;

use crate::entities::categories::{self, CategoryKind};
use crate::entities::transactions;
use crate::error::AppError;

pub use demo::DemoDashboardService;
pub use resolver::{demo_dashboard, resolve_dashboard, ScopedDashboard};
pub use user::UserDashboardService;

/// Days covered when no range is requested.
pub const DEFAULT_RANGE_DAYS: u16 = 7;

/// Rows shown in the "recent transactions" panel.
pub const DEFAULT_RECENT_LIMIT: u64 = 5;

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::invalid(
                "INVALID_RANGE",
                format!("Range start {start} is after end {end}"),
            ));
        }
        Ok(Self { start, end })
    }

    /// `days` days ending on `end` (inclusive). Zero is treated as one.
    pub fn last_days(end: Date, days: u16) -> Self {
        let span = i64::from(days.max(1)) - 1;
        let start = end
            .checked_sub(Duration::days(span))
            .unwrap_or(Date::MIN);
        Self { start, end }
    }

    /// The default dashboard range ending `today`.
    pub fn default_ending(today: Date) -> Self {
        Self::last_days(today, DEFAULT_RANGE_DAYS)
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = Date> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |d| {
            d.next_day().filter(|next| *next <= end)
        })
    }
}

/// A transaction as the dashboard shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionView {
    pub id: i32,
    pub category_id: i32,
    /// Category title prefixed with its icon.
    pub category: String,
    pub kind: CategoryKind,
    pub amount: i64,
    pub note: Option<String>,
    pub date: Date,
}

impl From<(transactions::Model, categories::Model)> for TransactionView {
    fn from((txn, category): (transactions::Model, categories::Model)) -> Self {
        Self {
            id: txn.id,
            category_id: category.id,
            category: category.title_with_icon(),
            kind: category.kind,
            amount: txn.amount,
            note: txn.note,
            date: txn.date,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_income: i64,
    pub total_expense: i64,
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub date: Date,
    pub income: i64,
    pub expense: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSnapshot {
    pub identity: Option<String>,
    pub range: DateRange,
    pub summary: DashboardSummary,
    pub expense_by_category: Vec<CategoryTotal>,
    pub daily: Vec<DailyPoint>,
    pub recent: Vec<TransactionView>,
}

fn add_amount(total: i64, amount: i64) -> Result<i64, AppError> {
    total
        .checked_add(amount)
        .ok_or_else(|| AppError::internal("dashboard total exceeds the supported range"))
}

pub fn summarize(txns: &[TransactionView]) -> Result<DashboardSummary, AppError> {
    let mut total_income = 0i64;
    let mut total_expense = 0i64;
    for t in txns {
        match t.kind {
            CategoryKind::Income => total_income = add_amount(total_income, t.amount)?,
            CategoryKind::Expense => total_expense = add_amount(total_expense, t.amount)?,
        }
    }

    let balance = total_income
        .checked_sub(total_expense)
        .ok_or_else(|| AppError::internal("dashboard balance exceeds the supported range"))?;

    Ok(DashboardSummary {
        total_income,
        total_expense,
        balance,
    })
}

/// Expense totals per category, largest first; ties by category name.
pub fn group_expenses(txns: &[TransactionView]) -> Result<Vec<CategoryTotal>, AppError> {
    let mut by_category: BTreeMap<&str, i64> = BTreeMap::new();
    for t in txns.iter().filter(|t| t.kind == CategoryKind::Expense) {
        let total = by_category.entry(t.category.as_str()).or_default();
        *total = add_amount(*total, t.amount)?;
    }

    let mut totals: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_string(),
            amount,
        })
        .collect();
    totals.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    Ok(totals)
}

/// One point per day of `range`, zero-filled.
pub fn daily_totals(range: DateRange, txns: &[TransactionView]) -> Result<Vec<DailyPoint>, AppError> {
    let mut points: Vec<DailyPoint> = range
        .days()
        .map(|date| DailyPoint {
            date,
            income: 0,
            expense: 0,
        })
        .collect();

    for t in txns.iter().filter(|t| range.contains(t.date)) {
        let offset = (t.date - range.start).whole_days() as usize;
        if let Some(point) = points.get_mut(offset) {
            match t.kind {
                CategoryKind::Income => point.income = add_amount(point.income, t.amount)?,
                CategoryKind::Expense => point.expense = add_amount(point.expense, t.amount)?,
            }
        }
    }
    Ok(points)
}

/// Dashboard operations every binding offers.
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Identity the binding is scoped to; `None` for the demo.
    fn identity(&self) -> Option<&str>;

    /// Unique per binding instance.
    fn scope_id(&self) -> Uuid;

    /// Transactions dated within `range`, oldest first.
    async fn transactions_in(&self, range: DateRange) -> Result<Vec<TransactionView>, AppError>;

    /// The `limit` newest transactions.
    async fn recent_transactions(&self, limit: u64) -> Result<Vec<TransactionView>, AppError>;

    async fn summary(&self, range: DateRange) -> Result<DashboardSummary, AppError> {
        summarize(&self.transactions_in(range).await?)
    }

    async fn expense_by_category(&self, range: DateRange) -> Result<Vec<CategoryTotal>, AppError> {
        group_expenses(&self.transactions_in(range).await?)
    }

    async fn daily_series(&self, range: DateRange) -> Result<Vec<DailyPoint>, AppError> {
        daily_totals(range, &self.transactions_in(range).await?)
    }

    async fn snapshot(
        &self,
        range: DateRange,
        recent_limit: u64,
    ) -> Result<DashboardSnapshot, AppError> {
        let txns = self.transactions_in(range).await?;
        let recent = self.recent_transactions(recent_limit).await?;

        Ok(DashboardSnapshot {
            identity: self.identity().map(str::to_string),
            range,
            summary: summarize(&txns)?,
            expense_by_category: group_expenses(&txns)?,
            daily: daily_totals(range, &txns)?,
            recent,
        })
    }
}
