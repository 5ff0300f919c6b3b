use async_trait::async_trait;
use time::{Date, Duration};
use uuid::Uuid;

use super::{DashboardService, DateRange, TransactionView};
use crate::entities::categories::CategoryKind;
use crate::error::AppError;

struct SampleCategory {
    id: i32,
    label: &'static str,
    kind: CategoryKind,
}

const SAMPLE_CATEGORIES: [SampleCategory; 5] = [
    SampleCategory { id: 1, label: "💼 Salary", kind: CategoryKind::Income },
    SampleCategory { id: 2, label: "🏠 Rent", kind: CategoryKind::Expense },
    SampleCategory { id: 3, label: "🍔 Food", kind: CategoryKind::Expense },
    SampleCategory { id: 4, label: "🚌 Transport", kind: CategoryKind::Expense },
    SampleCategory { id: 5, label: "🎁 Gifts", kind: CategoryKind::Income },
];

/// (days before the anchor, category index, amount, note)
const SAMPLE_ENTRIES: [(i64, usize, i64, &str); 12] = [
    (0, 2, 18, "Lunch"),
    (0, 3, 4, "Bus ticket"),
    (1, 2, 42, "Groceries"),
    (2, 4, 50, "Birthday"),
    (2, 3, 4, "Bus ticket"),
    (3, 2, 27, "Dinner out"),
    (4, 1, 900, "Monthly rent"),
    (5, 2, 35, "Groceries"),
    (6, 0, 2_500, "Salary"),
    (6, 3, 12, "Taxi"),
    (9, 2, 22, "Takeaway"),
    (12, 3, 30, "Train"),
];

/// Static sample data for the public demo page.
///
/// Entries are dated relative to "today", so the default range always has
/// something to show. Stateless apart from its scope id.
#[derive(Debug, Clone)]
pub struct DemoDashboardService {
    today: Date,
    scope_id: Uuid,
}

impl DemoDashboardService {
    pub fn new(today: Date) -> Self {
        Self {
            today,
            scope_id: Uuid::new_v4(),
        }
    }

    fn samples(&self) -> Vec<TransactionView> {
        SAMPLE_ENTRIES
            .iter()
            .enumerate()
            .filter_map(|(i, &(days_ago, cat, amount, note))| {
                let category = &SAMPLE_CATEGORIES[cat];
                let date = self.today.checked_sub(Duration::days(days_ago))?;
                Some(TransactionView {
                    id: i as i32 + 1,
                    category_id: category.id,
                    category: category.label.to_string(),
                    kind: category.kind,
                    amount,
                    note: Some(note.to_string()),
                    date,
                })
            })
            .collect()
    }
}

#[async_trait]
impl DashboardService for DemoDashboardService {
    fn identity(&self) -> Option<&str> {
        None
    }

    fn scope_id(&self) -> Uuid {
        self.scope_id
    }

    async fn transactions_in(&self, range: DateRange) -> Result<Vec<TransactionView>, AppError> {
        let mut txns: Vec<TransactionView> = self
            .samples()
            .into_iter()
            .filter(|t| range.contains(t.date))
            .collect();
        txns.sort_by_key(|t| (t.date, t.id));
        Ok(txns)
    }

    async fn recent_transactions(&self, limit: u64) -> Result<Vec<TransactionView>, AppError> {
        let mut txns = self.samples();
        txns.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        txns.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(txns)
    }
}
