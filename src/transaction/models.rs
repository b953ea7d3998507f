//! The transaction record and the response shapes built from it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use time::OffsetDateTime;

/// A sale-transaction record.
///
/// Records come from the remote seed dump and are immutable once stored.
/// Wire field names are camelCase to match the dump and the public API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The identifier assigned by the external source, not guaranteed dense.
    pub id: i64,
    /// Free-text product title.
    pub title: String,
    /// Free-text product description.
    pub description: String,
    /// The sale price. Non-negative in the source data.
    pub price: f64,
    /// A low-cardinality category label.
    pub category: String,
    /// Whether the item was sold.
    pub sold: bool,
    /// The date and time of the sale, which determines the month bucket.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

/// One page of transactions plus the total match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListing {
    /// The transactions on the requested page.
    pub data: Vec<Transaction>,
    /// How many transactions match the filter across all pages.
    pub total: u64,
    /// The 1-based page number that was returned.
    pub page: u64,
    /// The page size that was applied.
    pub per_page: u64,
}

/// Aggregate sale statistics for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The summed price of sold items. Zero when nothing matched.
    pub total_sale_amount: f64,
    /// How many matching items were sold.
    pub total_sold_items: u64,
    /// How many matching items were not sold.
    pub total_not_sold_items: u64,
}

/// The number of transactions that fall in one price bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketCount {
    /// The bucket label, e.g. `"101-200"`.
    pub label: &'static str,
    /// How many matching transactions fall in the bucket.
    pub count: u64,
}

/// Render bucket counts as the JSON object the bar-chart endpoint returns,
/// keyed by bucket label. Zero-count buckets are included explicitly.
pub(crate) fn buckets_to_json(buckets: &[BucketCount]) -> Value {
    let mut object = Map::new();

    for bucket in buckets {
        object.insert(bucket.label.to_owned(), json!(bucket.count));
    }

    Value::Object(object)
}
