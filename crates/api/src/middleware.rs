use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::ConnectInfo,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::context::RequestId;

/// Header carrying the correlation identifier, inbound and outbound.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request logger: correlation id + one log line per request.
///
/// Reuses an inbound `X-Request-ID` or generates one, writes it back into
/// the request headers and extensions for downstream handlers, echoes it on
/// the response, and after the inner service finishes logs method, path,
/// final status, remote address and elapsed time.
pub async fn request_logger(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let start = Instant::now();

    let request_id = ensure_request_id(req.headers_mut());
    req.extensions_mut().insert(request_id.clone());

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut response = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let elapsed = start.elapsed();
    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        remote_addr = %remote_addr,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "request completed"
    );

    response
}

/// Return the inbound correlation id, or generate one and store it in `headers`.
///
/// A missing, empty or non-ASCII header counts as absent.
pub fn ensure_request_id(headers: &mut HeaderMap) -> RequestId {
    let inbound = headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    if let Some(id) = inbound {
        return RequestId::new(id);
    }

    let id = RequestId::generate();
    if let Ok(value) = HeaderValue::from_str(id.as_str()) {
        headers.insert(REQUEST_ID_HEADER, value);
    }
    id
}
