pub mod categories;
pub mod dashboard;
pub mod transactions;
