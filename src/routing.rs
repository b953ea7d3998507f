//! Application router configuration.

use axum::{Router, middleware, routing::get};

use crate::{
    dashboard::get_dashboard,
    endpoints,
    logging::logging_middleware,
    seed::init_database,
    state::AppState,
    stores::TransactionStore,
    transaction::{get_bar_chart, get_pie_chart, get_statistics, get_transactions},
};

/// Return a router with all the app's routes.
pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(endpoints::INIT, get(init_database::<T>))
        .route(endpoints::TRANSACTIONS, get(get_transactions::<T>))
        .route(endpoints::STATISTICS, get(get_statistics::<T>))
        .route(endpoints::BAR_CHART, get(get_bar_chart::<T>))
        .route(endpoints::PIE_CHART, get(get_pie_chart::<T>))
        .route(endpoints::DASHBOARD, get(get_dashboard::<T>))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

#[cfg(test)]
mod build_router_tests {
    use std::sync::{Arc, Mutex};

    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::Value;
    use time::macros::datetime;

    use crate::{
        AppState, endpoints, initialize_db,
        stores::{SQLiteTransactionStore, TransactionStore},
        transaction::Transaction,
    };

    use super::build_router;

    fn get_test_server() -> TestServer {
        let conn = Connection::open_in_memory().expect("Could not open database in memory.");
        initialize_db(&conn).expect("Could not initialize database.");
        let mut store = SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)));
        store
            .replace_all(vec![Transaction {
                id: 1,
                title: "Shirt".to_owned(),
                description: "A shirt".to_owned(),
                price: 45.0,
                category: "clothing".to_owned(),
                sold: true,
                date_of_sale: datetime!(2021-12-24 18:00 UTC),
            }])
            .expect("Could not seed store.");

        let state = AppState::new("http://unused.test/seed.json", Default::default(), store);

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn all_month_scoped_routes_respond() {
        let server = get_test_server();
        let routes = [
            endpoints::TRANSACTIONS,
            endpoints::STATISTICS,
            endpoints::BAR_CHART,
            endpoints::PIE_CHART,
            endpoints::DASHBOARD,
        ];

        for route in routes {
            let response = server.get(route).add_query_param("month", "december").await;

            response.assert_status_ok();
        }
    }

    #[tokio::test]
    async fn missing_month_parameter_is_rejected() {
        let server = get_test_server();

        let response = server.get(endpoints::STATISTICS).await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn statistics_route_reflects_seeded_data() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS)
            .add_query_param("month", "december")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["totalSaleAmount"], 45.0);
    }
}
