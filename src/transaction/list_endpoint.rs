//! The endpoint that lists transactions for a month with search and
//! pagination.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    Error, filter::TransactionFilter, month::Month, state::AppState, stores::TransactionStore,
};

use super::{core::list_transactions, models::TransactionListing};

/// The query parameters accepted by the transaction listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// The month name to filter by, e.g. "march".
    pub month: String,
    /// Text to match against the title, description, and price.
    #[serde(default)]
    pub search: String,
    /// The 1-based page to return. Defaults to the configured first page.
    pub page: Option<u64>,
    /// The page size. Defaults to the configured page size; not capped.
    #[serde(rename = "perPage")]
    pub per_page: Option<u64>,
}

/// Handle GET requests for one page of a month's transactions.
///
/// # Errors
/// Returns an [Error::InvalidMonth] for an unparseable month name and an
/// [Error::SqlError] if the store query fails.
pub async fn get_transactions<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<ListParams>,
) -> Result<Json<TransactionListing>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let month: Month = params.month.parse()?;
    let filter = TransactionFilter {
        month,
        search: params.search,
    };
    let page = params.page.unwrap_or(state.pagination_config.default_page);
    let per_page = params
        .per_page
        .unwrap_or(state.pagination_config.default_page_size);

    let listing = list_transactions(&state.transaction_store, &filter, page, per_page)?;

    Ok(Json(listing))
}

#[cfg(test)]
mod get_transactions_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::Value;
    use time::macros::datetime;

    use crate::{
        AppState, endpoints,
        initialize_db,
        stores::{SQLiteTransactionStore, TransactionStore},
        transaction::Transaction,
    };

    use super::get_transactions;

    fn get_test_server() -> TestServer {
        let conn = Connection::open_in_memory().expect("Could not open database in memory.");
        initialize_db(&conn).expect("Could not initialize database.");
        let mut store = SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)));

        let transactions = (1..=5)
            .map(|i| Transaction {
                id: i,
                title: format!("widget #{i}"),
                description: "a widget".to_owned(),
                price: (i * 100) as f64,
                category: "widgets".to_owned(),
                sold: true,
                date_of_sale: datetime!(2022-03-01 09:00 UTC) + time::Duration::days(i),
            })
            .collect();
        store
            .replace_all(transactions)
            .expect("Could not seed store.");

        let state = AppState::new("http://unused.test/seed.json", Default::default(), store);
        let app = Router::new()
            .route(
                endpoints::TRANSACTIONS,
                get(get_transactions::<SQLiteTransactionStore>),
            )
            .with_state(state);

        TestServer::new(app)
    }

    #[tokio::test]
    async fn lists_month_with_defaults() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "march")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["total"], 5);
        assert_eq!(body["page"], 1);
        assert_eq!(body["perPage"], 10);
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn paginates_with_page_and_per_page() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "march")
            .add_query_param("page", "2")
            .add_query_param("perPage", "2")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["total"], 5);
        assert_eq!(body["page"], 2);
        assert_eq!(body["perPage"], 2);
        let ids: Vec<i64> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|transaction| transaction["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[tokio::test]
    async fn numeric_search_matches_exact_price() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "march")
            .add_query_param("search", "300")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["price"], 300.0);
    }

    #[tokio::test]
    async fn invalid_month_is_a_bad_request() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "marchuary")
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("marchuary"));
    }
}
