//! Seeding the database from the remote JSON dump.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{Error, state::AppState, stores::TransactionStore, transaction::Transaction};

/// The JSON dump the database is seeded from when no other URL is
/// configured.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Download and decode the seed dump at `url`.
///
/// # Errors
/// Returns an [Error::SeedFetch] if the download fails or the server
/// responds with an error status, and an [Error::SeedDecode] if the body is
/// not a JSON list of transactions.
pub async fn fetch_transactions(url: &str) -> Result<Vec<Transaction>, Error> {
    let response = reqwest::get(url)
        .await?
        .error_for_status()
        .map_err(|error| Error::SeedFetch(error.to_string()))?;

    let transactions = response.json().await?;

    Ok(transactions)
}

/// Handle GET requests that replace the whole record set with the remote
/// dump.
///
/// The operation is destructive and fail-fast: the fetch happens before the
/// delete, so a failed download leaves the store untouched, but a failure
/// during the insert leaves it empty with no rollback.
///
/// # Errors
/// Returns an [Error::SeedFetch] or [Error::SeedDecode] if the dump cannot
/// be retrieved, and an [Error::SqlError] if the replacement fails.
pub async fn init_database<T>(State(state): State<AppState<T>>) -> Result<Json<Value>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let transactions = fetch_transactions(&state.seed_url).await?;

    let mut store = state.transaction_store;
    let inserted = store.replace_all(transactions)?;
    tracing::info!("seeded the database with {inserted} transactions");

    Ok(Json(json!({ "message": "Database initialized!" })))
}
