//! The endpoint for the per-category breakdown behind the pie chart.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    Error,
    month::Month,
    state::AppState,
    stores::{CategoryCount, TransactionStore},
};

use super::{core::category_breakdown, statistics_endpoint::MonthParams};

/// Handle GET requests for a month's category breakdown.
///
/// The entries come back in whatever order the store's grouping produces.
///
/// # Errors
/// Returns an [Error::InvalidMonth] for an unparseable month name and an
/// [Error::SqlError] if the store query fails.
pub async fn get_pie_chart<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<MonthParams>,
) -> Result<Json<Vec<CategoryCount>>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let month: Month = params.month.parse()?;

    let breakdown = category_breakdown(&state.transaction_store, month)?;

    Ok(Json(breakdown))
}
