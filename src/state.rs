//! Implements a struct that holds the state of the REST server.

use std::marker::{Send, Sync};

use crate::{pagination::PaginationConfig, stores::TransactionStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The config that controls how to page transaction listings.
    pub pagination_config: PaginationConfig,
    /// The URL of the remote JSON dump used to seed the database.
    pub seed_url: String,
    /// The store holding the [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
}

impl<T> AppState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// Create a new [AppState].
    pub fn new(seed_url: &str, pagination_config: PaginationConfig, transaction_store: T) -> Self {
        Self {
            pagination_config,
            seed_url: seed_url.to_owned(),
            transaction_store,
        }
    }
}
