//! Middleware for logging requests and responses.

use axum::{extract::Request, middleware::Next, response::Response};

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the response body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    tracing::info!(
        "Received request: {} {}",
        request.method(),
        request.uri()
    );

    let response = next.run(request).await;

    let (headers, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let body_text = String::from_utf8_lossy(&body_bytes).to_string();
    log_response(&headers, &body_text);

    Response::from_parts(headers, body_text.into())
}

/// The number of body bytes to log at the `info` level before truncating.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

fn log_response(headers: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {} body: {:}...",
            headers.status,
            &body[..truncation_index(body)]
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {} body: {body:?}", headers.status);
    }
}

/// The end of the longest prefix of `body` that fits in
/// [LOG_BODY_LENGTH_LIMIT] bytes without splitting a character.
///
/// Must only be called when `body` is longer than the limit.
fn truncation_index(body: &str) -> usize {
    let mut end = LOG_BODY_LENGTH_LIMIT;

    while !body.is_char_boundary(end) {
        end -= 1;
    }

    end
}
