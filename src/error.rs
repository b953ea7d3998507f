//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The client supplied a string that is not an English month name.
    ///
    /// The original service silently turned unparseable month names into a
    /// filter that matched nothing. That behaviour hid typos from clients,
    /// so the parse is fallible and surfaces as a 400 instead.
    #[error("\"{0}\" is not a valid month name")]
    InvalidMonth(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// The seed data could not be downloaded from the remote source.
    #[error("could not fetch seed data: {0}")]
    SeedFetch(String),

    /// The seed data was downloaded but could not be decoded as a list of
    /// transactions.
    #[error("could not decode seed data: {0}")]
    SeedDecode(String),

    /// A background task spawned for the dashboard fan-out panicked or was
    /// cancelled before it produced a result.
    #[error("a dashboard sub-task failed to complete: {0}")]
    TaskJoin(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Error::SeedDecode(value.to_string())
        } else {
            Error::SeedFetch(value.to_string())
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, message) = match &self {
            Error::InvalidMonth(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            // Details of the remaining errors are for the server logs, not
            // the client.
            error => {
                tracing::error!("request failed: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "something went wrong, check the server logs for more details".to_owned(),
                )
            }
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    #[test]
    fn invalid_month_maps_to_bad_request() {
        let response = Error::InvalidMonth("smarch".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn sql_error_maps_to_internal_server_error() {
        let response = Error::SqlError(rusqlite::Error::QueryReturnedNoRows).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn seed_fetch_error_maps_to_internal_server_error() {
        let response = Error::SeedFetch("connection refused".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
