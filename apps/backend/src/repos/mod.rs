//! Repository functions, generic over `ConnectionTrait` so they run on the
//! pool or inside a transaction.

pub mod categories;
pub mod transactions;
pub mod users;
