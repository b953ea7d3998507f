//! The combined dashboard view, built by fanning out to the four
//! month-scoped service operations.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Serialize;
use serde_json::Value;
use tokio::task;

use crate::{
    Error,
    filter::TransactionFilter,
    month::Month,
    state::AppState,
    stores::{CategoryCount, TransactionStore},
    transaction::{
        MonthParams, Statistics, TransactionListing, buckets_to_json, category_breakdown,
        compute_statistics, list_transactions, price_histogram,
    },
};

/// The merged dashboard response: one month's listing, statistics, and both
/// chart groupings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// The first page of the month's transactions.
    pub transactions: TransactionListing,
    /// The month's sale statistics.
    pub statistics: Statistics,
    /// The price-range histogram keyed by bucket label.
    pub bar_chart: Value,
    /// The per-category breakdown.
    pub pie_chart: Vec<CategoryCount>,
}

/// Handle GET requests for the combined dashboard view.
///
/// The four sub-operations run concurrently as blocking tasks and are
/// joined with all-or-nothing semantics: the first failure fails the whole
/// response, so the client never sees partial data.
///
/// # Errors
/// Returns an [Error::InvalidMonth] for an unparseable month name, an
/// [Error::SqlError] if any sub-operation fails, and an [Error::TaskJoin]
/// if a sub-task panics.
pub async fn get_dashboard<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<MonthParams>,
) -> Result<Json<DashboardView>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let month: Month = params.month.parse()?;

    let listing_store = state.transaction_store.clone();
    let statistics_store = state.transaction_store.clone();
    let histogram_store = state.transaction_store.clone();
    let breakdown_store = state.transaction_store;
    let pagination = state.pagination_config;

    let (transactions, statistics, buckets, pie_chart) = tokio::try_join!(
        run_blocking(move || {
            let filter = TransactionFilter {
                month,
                search: String::new(),
            };
            list_transactions(
                &listing_store,
                &filter,
                pagination.default_page,
                pagination.default_page_size,
            )
        }),
        run_blocking(move || compute_statistics(&statistics_store, month)),
        run_blocking(move || price_histogram(&histogram_store, month)),
        run_blocking(move || category_breakdown(&breakdown_store, month)),
    )?;

    Ok(Json(DashboardView {
        transactions,
        statistics,
        bar_chart: buckets_to_json(&buckets),
        pie_chart,
    }))
}

/// Run one store-bound sub-operation on the blocking thread pool.
async fn run_blocking<F, R>(operation: F) -> Result<R, Error>
where
    F: FnOnce() -> Result<R, Error> + Send + 'static,
    R: Send + 'static,
{
    task::spawn_blocking(operation)
        .await
        .map_err(|error| Error::TaskJoin(error.to_string()))?
}
