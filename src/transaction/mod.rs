//! The transaction feature: the record model, the month-scoped service
//! operations, and their HTTP handlers.

mod bar_chart_endpoint;
mod core;
mod list_endpoint;
mod models;
mod pie_chart_endpoint;
mod statistics_endpoint;

pub use bar_chart_endpoint::get_bar_chart;
pub use core::{category_breakdown, compute_statistics, list_transactions, price_histogram};
pub use list_endpoint::get_transactions;
pub use models::{BucketCount, Statistics, Transaction, TransactionListing};
pub(crate) use models::buckets_to_json;
pub use pie_chart_endpoint::get_pie_chart;
pub use statistics_endpoint::{MonthParams, get_statistics};
