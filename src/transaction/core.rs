//! The month-scoped service operations shared by the HTTP handlers and the
//! dashboard fan-out.

use crate::{
    Error,
    filter::{PRICE_BUCKETS, Predicate, TransactionFilter},
    month::Month,
    stores::{CategoryCount, TransactionStore},
};

use super::models::{BucketCount, Statistics, TransactionListing};

/// List one page of the transactions selected by `filter`.
///
/// `page` is 1-based; page numbers below 1 are clamped to the first page.
/// `per_page` has no upper bound, which mirrors the original service and is
/// a known resource risk.
///
/// # Errors
/// Returns an [Error::SqlError] if the store query fails.
pub fn list_transactions<T>(
    store: &T,
    filter: &TransactionFilter,
    page: u64,
    per_page: u64,
) -> Result<TransactionListing, Error>
where
    T: TransactionStore,
{
    let page = page.max(1);
    let per_page = per_page.max(1);
    let predicate = filter.predicate();

    // A saturated offset lands past the end and yields an empty page.
    let offset = (page - 1).saturating_mul(per_page);
    let data = store.get_page(&predicate, per_page, offset)?;
    let total = store.count(&predicate)?;

    Ok(TransactionListing {
        data,
        total,
        page,
        per_page,
    })
}

/// Compute the sale statistics for `month`.
///
/// A month with no matching transactions yields all-zero statistics, not an
/// error.
///
/// # Errors
/// Returns an [Error::SqlError] if a store query fails.
pub fn compute_statistics<T>(store: &T, month: Month) -> Result<Statistics, Error>
where
    T: TransactionStore,
{
    let sold = Predicate::MonthOfSale(month).and(Predicate::Sold(true));
    let not_sold = Predicate::MonthOfSale(month).and(Predicate::Sold(false));

    Ok(Statistics {
        total_sale_amount: store.sum_price(&sold)?,
        total_sold_items: store.count(&sold)?,
        total_not_sold_items: store.count(&not_sold)?,
    })
}

/// Count the transactions of `month` in each of the ten fixed price
/// buckets.
///
/// Every bucket appears in the result, zero counts included, so the counts
/// always partition the month's transactions.
///
/// # Errors
/// Returns an [Error::SqlError] if a store query fails.
pub fn price_histogram<T>(store: &T, month: Month) -> Result<Vec<BucketCount>, Error>
where
    T: TransactionStore,
{
    PRICE_BUCKETS
        .iter()
        .map(|bucket| {
            let predicate = Predicate::MonthOfSale(month).and(bucket.predicate());

            Ok(BucketCount {
                label: bucket.label,
                count: store.count(&predicate)?,
            })
        })
        .collect()
}

/// Count the transactions of `month` grouped by category.
///
/// The order of the pairs is whatever the store's grouping produces.
///
/// # Errors
/// Returns an [Error::SqlError] if the store query fails.
pub fn category_breakdown<T>(store: &T, month: Month) -> Result<Vec<CategoryCount>, Error>
where
    T: TransactionStore,
{
    store.count_by_category(&Predicate::MonthOfSale(month))
}
