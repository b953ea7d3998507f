//! The endpoint for monthly sale statistics.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{Error, month::Month, state::AppState, stores::TransactionStore};

use super::{core::compute_statistics, models::Statistics};

/// The query parameters shared by the month-scoped chart and statistics
/// endpoints.
#[derive(Debug, Deserialize)]
pub struct MonthParams {
    /// The month name to filter by, e.g. "march".
    pub month: String,
}

/// Handle GET requests for a month's sale statistics.
///
/// # Errors
/// Returns an [Error::InvalidMonth] for an unparseable month name and an
/// [Error::SqlError] if a store query fails.
pub async fn get_statistics<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<MonthParams>,
) -> Result<Json<Statistics>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let month: Month = params.month.parse()?;

    let statistics = compute_statistics(&state.transaction_store, month)?;

    Ok(Json(statistics))
}
