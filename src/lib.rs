//! Saleboard is a REST backend for a sale-transaction analytics dashboard.
//!
//! The service keeps a single collection of sale transactions, seeded from a
//! remote JSON dump, and serves paginated listings, monthly statistics, a
//! price-range histogram, a category breakdown, and a combined dashboard
//! view built from those four.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod dashboard;
mod db;
mod endpoints;
mod error;
mod filter;
mod logging;
mod month;
mod pagination;
mod routing;
mod seed;
mod state;
mod stores;
mod transaction;

pub use dashboard::DashboardView;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use filter::{PRICE_BUCKETS, Predicate, PriceBucket, TransactionFilter};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::Month;
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use seed::DEFAULT_SEED_URL;
pub use state::AppState;
pub use stores::{CategoryCount, SQLiteTransactionStore, TransactionStore};
pub use transaction::{BucketCount, Statistics, Transaction, TransactionListing};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
