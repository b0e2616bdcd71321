use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Generic message returned when the list/search endpoint cannot read storage.
pub const NEWS_FETCH_FAILED: &str = "Ошибка при получении новостей";

/// Message returned for a non-numeric `/news/{n}` path segment.
pub const INVALID_N: &str = "Invalid parameter 'n'";

/// Headers every news endpoint sets before deciding status or body.
pub fn news_headers() -> [(HeaderName, HeaderValue); 2] {
    [
        (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
    ]
}

/// Plain-text error body under the already-chosen news headers.
///
/// The body is the message followed by a newline; `Content-Type` stays
/// `application/json` because the headers were fixed first.
pub fn news_error(
    headers: [(HeaderName, HeaderValue); 2],
    status: StatusCode,
    message: impl Into<String>,
) -> Response {
    let mut body = message.into();
    body.push('\n');
    (status, headers, body).into_response()
}
