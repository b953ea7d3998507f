//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, params_from_iter};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    filter::Predicate,
    stores::{CategoryCount, TransactionStore},
    transaction::Transaction,
};

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock_connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLock)
    }
}

const COLUMNS: &str = "id, title, description, price, category, sold, date_of_sale";

impl TransactionStore for SQLiteTransactionStore {
    /// Retrieve a page of transactions matching `predicate`.
    ///
    /// Rows are ordered by their source ID to keep pagination stable across
    /// requests.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn get_page(
        &self,
        predicate: &Predicate,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Transaction>, Error> {
        // SQLite evaluates LIMIT and OFFSET as signed 64-bit integers.
        let limit = limit.min(i64::MAX as u64);
        let offset = offset.min(i64::MAX as u64);

        let mut parameters = Vec::new();
        let where_clause = predicate.to_sql(&mut parameters);
        let query_string = format!(
            "SELECT {COLUMNS} FROM \"transaction\" WHERE {where_clause} \
             ORDER BY id ASC LIMIT {limit} OFFSET {offset}"
        );

        self.lock_connection()?
            .prepare(&query_string)?
            .query_map(params_from_iter(parameters.iter()), Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Count the transactions matching `predicate`.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn count(&self, predicate: &Predicate) -> Result<u64, Error> {
        let mut parameters = Vec::new();
        let where_clause = predicate.to_sql(&mut parameters);
        let query_string = format!("SELECT COUNT(*) FROM \"transaction\" WHERE {where_clause}");

        // SQLite integers are i64; COUNT(*) is never negative.
        let count: i64 = self.lock_connection()?.query_row(
            &query_string,
            params_from_iter(parameters.iter()),
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }

    /// Sum the prices of the transactions matching `predicate`.
    ///
    /// An empty match sums to zero rather than NULL.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn sum_price(&self, predicate: &Predicate) -> Result<f64, Error> {
        let mut parameters = Vec::new();
        let where_clause = predicate.to_sql(&mut parameters);
        let query_string = format!(
            "SELECT COALESCE(SUM(price), 0.0) FROM \"transaction\" WHERE {where_clause}"
        );

        let sum = self.lock_connection()?.query_row(
            &query_string,
            params_from_iter(parameters.iter()),
            |row| row.get(0),
        )?;

        Ok(sum)
    }

    /// Count the transactions matching `predicate`, grouped by category.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn count_by_category(&self, predicate: &Predicate) -> Result<Vec<CategoryCount>, Error> {
        let mut parameters = Vec::new();
        let where_clause = predicate.to_sql(&mut parameters);
        let query_string = format!(
            "SELECT category, COUNT(*) FROM \"transaction\" WHERE {where_clause} \
             GROUP BY category"
        );

        self.lock_connection()?
            .prepare(&query_string)?
            .query_map(params_from_iter(parameters.iter()), |row| {
                Ok(CategoryCount {
                    category: row.get(0)?,
                    count: row.get::<_, i64>(1)? as u64,
                })
            })?
            .map(|maybe_count| maybe_count.map_err(Error::SqlError))
            .collect()
    }

    /// Replace the entire collection with `transactions`.
    ///
    /// The delete runs before, and separately from, the batch insert: a
    /// failed insert leaves the store empty rather than restoring the old
    /// records.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn replace_all(&mut self, transactions: Vec<Transaction>) -> Result<usize, Error> {
        let connection = self.lock_connection()?;

        connection.execute("DELETE FROM \"transaction\"", ())?;

        let tx = connection.unchecked_transaction()?;
        let mut inserted = 0;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO \"transaction\" ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
            ))?;

            for transaction in transactions {
                stmt.execute((
                    transaction.id,
                    transaction.title,
                    transaction.description,
                    transaction.price,
                    transaction.category,
                    transaction.sold,
                    transaction.date_of_sale,
                ))?;
                inserted += 1;
            }
        }

        tx.commit()?;
        Ok(inserted)
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id INTEGER PRIMARY KEY,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL,
                    price REAL NOT NULL,
                    category TEXT NOT NULL,
                    sold INTEGER NOT NULL,
                    date_of_sale TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Transaction {
            id: row.get(offset)?,
            title: row.get(offset + 1)?,
            description: row.get(offset + 2)?,
            price: row.get(offset + 3)?,
            category: row.get(offset + 4)?,
            sold: row.get(offset + 5)?,
            date_of_sale: row.get(offset + 6)?,
        })
    }
}

#[cfg(test)]
mod sqlite_transaction_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::{OffsetDateTime, macros::datetime};

    use crate::{
        db::initialize,
        filter::{PRICE_BUCKETS, Predicate, TransactionFilter},
        month::Month,
        transaction::Transaction,
    };

    use super::{SQLiteTransactionStore, TransactionStore};

    fn get_store() -> SQLiteTransactionStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)))
    }

    fn transaction(
        id: i64,
        title: &str,
        price: f64,
        category: &str,
        sold: bool,
        date_of_sale: OffsetDateTime,
    ) -> Transaction {
        Transaction {
            id,
            title: title.to_owned(),
            description: format!("description of {title}"),
            price,
            category: category.to_owned(),
            sold,
            date_of_sale,
        }
    }

    fn march_fixture() -> Vec<Transaction> {
        vec![
            transaction(1, "Shirt", 50.0, "clothing", true, datetime!(2021-03-02 10:00 UTC)),
            transaction(2, "Laptop", 850.0, "electronics", false, datetime!(2021-03-10 12:30 UTC)),
            transaction(3, "Phone", 150.0, "electronics", true, datetime!(2022-03-15 09:45 UTC)),
            transaction(4, "Monitor", 901.0, "electronics", true, datetime!(2021-03-27 20:29 UTC)),
            transaction(5, "Couch", 1500.0, "furniture", false, datetime!(2022-03-01 00:00 UTC)),
            // Not in March, must never be matched by a March filter.
            transaction(6, "Desk", 150.0, "furniture", true, datetime!(2021-04-01 08:00 UTC)),
        ]
    }

    #[test]
    fn replace_all_inserts_every_transaction() {
        let mut store = get_store();
        let want = march_fixture();

        let inserted = store
            .replace_all(want.clone())
            .expect("could not replace transactions");

        assert_eq!(inserted, want.len());
        let got = store
            .get_page(&Predicate::All(vec![]), 1_000, 0)
            .expect("could not query transactions");
        assert_eq!(got, want);
    }

    #[test]
    fn replace_all_twice_with_same_data_is_idempotent() {
        let mut store = get_store();
        let data = march_fixture();

        store.replace_all(data.clone()).unwrap();
        let first_count = store.count(&Predicate::All(vec![])).unwrap();
        let first_sum = store.sum_price(&Predicate::All(vec![])).unwrap();

        store.replace_all(data).unwrap();
        let second_count = store.count(&Predicate::All(vec![])).unwrap();
        let second_sum = store.sum_price(&Predicate::All(vec![])).unwrap();

        assert_eq!(first_count, second_count);
        assert_eq!(first_sum, second_sum);
    }

    #[test]
    fn month_filter_matches_across_years() {
        let mut store = get_store();
        store.replace_all(march_fixture()).unwrap();

        let count = store.count(&Predicate::MonthOfSale(Month::March)).unwrap();

        assert_eq!(count, 5, "March transactions from 2021 and 2022 should both match");
    }

    #[test]
    fn sold_and_not_sold_counts_partition_the_month() {
        let mut store = get_store();
        store.replace_all(march_fixture()).unwrap();
        let month = Predicate::MonthOfSale(Month::March);

        let total = store.count(&month).unwrap();
        let sold = store
            .count(&month.clone().and(Predicate::Sold(true)))
            .unwrap();
        let not_sold = store.count(&month.and(Predicate::Sold(false))).unwrap();

        assert_eq!(sold + not_sold, total);
        assert_eq!(sold, 3);
        assert_eq!(not_sold, 2);
    }

    #[test]
    fn sum_price_of_sold_march_transactions() {
        let mut store = get_store();
        store.replace_all(march_fixture()).unwrap();

        let sum = store
            .sum_price(&Predicate::MonthOfSale(Month::March).and(Predicate::Sold(true)))
            .unwrap();

        assert_eq!(sum, 50.0 + 150.0 + 901.0);
    }

    #[test]
    fn sum_price_over_empty_match_is_zero() {
        let mut store = get_store();
        store.replace_all(march_fixture()).unwrap();

        let sum = store
            .sum_price(&Predicate::MonthOfSale(Month::December))
            .unwrap();

        assert_eq!(sum, 0.0);
    }

    #[test]
    fn bucket_counts_partition_the_month() {
        let mut store = get_store();
        store.replace_all(march_fixture()).unwrap();
        let month = Predicate::MonthOfSale(Month::March);

        let total = store.count(&month).unwrap();
        let bucket_total: u64 = PRICE_BUCKETS
            .iter()
            .map(|bucket| {
                store
                    .count(&month.clone().and(bucket.predicate()))
                    .expect("could not count bucket")
            })
            .sum();

        assert_eq!(bucket_total, total, "every transaction should fall in exactly one bucket");
    }

    #[test]
    fn unbounded_bucket_catches_high_prices() {
        let mut store = get_store();
        store.replace_all(march_fixture()).unwrap();
        let month = Predicate::MonthOfSale(Month::March);

        let count = store
            .count(&month.and(PRICE_BUCKETS[9].predicate()))
            .unwrap();

        // The 901.0 monitor and the 1500.0 couch.
        assert_eq!(count, 2);
    }

    #[test]
    fn count_by_category_groups_march_transactions() {
        let mut store = get_store();
        store.replace_all(march_fixture()).unwrap();

        let mut got = store
            .count_by_category(&Predicate::MonthOfSale(Month::March))
            .unwrap();
        got.sort_by(|a, b| a.category.cmp(&b.category));

        let categories: Vec<(&str, u64)> = got
            .iter()
            .map(|entry| (entry.category.as_str(), entry.count))
            .collect();
        assert_eq!(
            categories,
            vec![("clothing", 1), ("electronics", 3), ("furniture", 1)]
        );
    }

    #[test]
    fn pages_concatenate_to_the_full_filtered_set() {
        let mut store = get_store();
        store.replace_all(march_fixture()).unwrap();
        let month = Predicate::MonthOfSale(Month::March);
        let per_page = 2;

        let want = store.get_page(&month, 1_000, 0).unwrap();

        let mut got = Vec::new();
        let mut page = 0;
        loop {
            let rows = store.get_page(&month, per_page, page * per_page).unwrap();
            assert!(rows.len() as u64 <= per_page);
            if rows.is_empty() {
                break;
            }
            got.extend(rows);
            page += 1;
        }

        assert_eq!(got, want, "pages should cover the filtered set exactly once");
    }

    #[test]
    fn get_page_with_limit_and_offset_past_i64_is_an_empty_page() {
        let mut store = get_store();
        store.replace_all(march_fixture()).unwrap();
        let month = Predicate::MonthOfSale(Month::March);

        let got = store.get_page(&month, u64::MAX, u64::MAX).unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn numeric_search_matches_price_exactly() {
        let mut store = get_store();
        store.replace_all(march_fixture()).unwrap();
        let filter = TransactionFilter {
            month: Month::March,
            search: "150".to_owned(),
        };

        let got = store.get_page(&filter.predicate(), 1_000, 0).unwrap();

        // Only the March phone at 150.0; the April desk at 150.0 is out of
        // the month and the 1500.0 couch is not an exact price match.
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, 3);
    }

    #[test]
    fn text_search_matches_title_and_description_case_insensitively() {
        let mut store = get_store();
        store.replace_all(march_fixture()).unwrap();
        let filter = TransactionFilter {
            month: Month::March,
            search: "LAPTOP".to_owned(),
        };

        let got = store.get_page(&filter.predicate(), 1_000, 0).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, 2);
    }

    #[test]
    fn non_numeric_search_never_matches_on_price() {
        let mut store = get_store();
        store.replace_all(march_fixture()).unwrap();
        let filter = TransactionFilter {
            month: Month::March,
            search: "no such item".to_owned(),
        };

        let got = store.get_page(&filter.predicate(), 1_000, 0).unwrap();

        assert!(got.is_empty());
    }
}
