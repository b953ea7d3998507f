//! The repository layer that owns persisted transactions.

mod sqlite;
mod transaction;

pub use sqlite::SQLiteTransactionStore;
pub use transaction::{CategoryCount, TransactionStore};
