//! The endpoint for the price-range histogram behind the bar chart.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::Value;

use crate::{Error, month::Month, state::AppState, stores::TransactionStore};

use super::{
    core::price_histogram,
    models::buckets_to_json,
    statistics_endpoint::MonthParams,
};

/// Handle GET requests for a month's price-range histogram.
///
/// The response maps all ten fixed bucket labels to counts, zero-count
/// buckets included.
///
/// # Errors
/// Returns an [Error::InvalidMonth] for an unparseable month name and an
/// [Error::SqlError] if a store query fails.
pub async fn get_bar_chart<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<MonthParams>,
) -> Result<Json<Value>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let month: Month = params.month.parse()?;

    let buckets = price_histogram(&state.transaction_store, month)?;

    Ok(Json(buckets_to_json(&buckets)))
}
