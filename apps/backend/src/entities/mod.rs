pub mod categories;
pub mod transactions;
pub mod users;

pub use categories::CategoryKind;
pub use categories::Entity as Categories;
pub use categories::Model as Category;
pub use transactions::Entity as Transactions;
pub use transactions::Model as Transaction;
pub use users::Entity as Users;
pub use users::Model as User;
