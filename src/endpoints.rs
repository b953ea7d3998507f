//! The API endpoints URIs.

/// The route that seeds the database from the remote JSON dump.
pub const INIT: &str = "/api/init";
/// The route that lists transactions for a month with search and pagination.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for monthly sale statistics.
pub const STATISTICS: &str = "/api/statistics";
/// The route for the price-range histogram.
pub const BAR_CHART: &str = "/api/bar-chart";
/// The route for the per-category breakdown.
pub const PIE_CHART: &str = "/api/pie-chart";
/// The route for the combined dashboard view.
pub const DASHBOARD: &str = "/api/dashboard";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::INIT);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::STATISTICS);
        assert_endpoint_is_valid_uri(endpoints::BAR_CHART);
        assert_endpoint_is_valid_uri(endpoints::PIE_CHART);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD);
    }
}
