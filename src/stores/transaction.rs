//! Defines the transaction store trait.

use serde::{Deserialize, Serialize};

use crate::{Error, filter::Predicate, transaction::Transaction};

/// The number of transactions in one category, as produced by the grouped
/// category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category label.
    pub category: String,
    /// How many matching transactions carry the label.
    pub count: u64,
}

/// Handles the retrieval and bulk replacement of transactions.
///
/// Records are immutable once stored; the only write operation is
/// [TransactionStore::replace_all], which the seed endpoint uses to swap the
/// whole collection.
pub trait TransactionStore {
    /// Retrieve up to `limit` transactions matching `predicate`, skipping
    /// the first `offset` matches.
    fn get_page(
        &self,
        predicate: &Predicate,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Transaction>, Error>;

    /// Count the transactions matching `predicate`.
    fn count(&self, predicate: &Predicate) -> Result<u64, Error>;

    /// Sum the prices of the transactions matching `predicate`.
    ///
    /// A predicate that matches nothing sums to zero.
    fn sum_price(&self, predicate: &Predicate) -> Result<f64, Error>;

    /// Count the transactions matching `predicate`, grouped by category.
    ///
    /// The order of the returned pairs is whatever the grouping produces;
    /// callers must not rely on it.
    fn count_by_category(&self, predicate: &Predicate) -> Result<Vec<CategoryCount>, Error>;

    /// Replace the entire collection with `transactions` and return how many
    /// were inserted.
    ///
    /// This is destructive and fail-fast: the existing records are deleted
    /// before the insert, and a mid-operation failure leaves the store empty
    /// or partially populated with no rollback.
    fn replace_all(&mut self, transactions: Vec<Transaction>) -> Result<usize, Error>;
}
