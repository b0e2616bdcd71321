//! `/news` handlers.
//!
//! Both handlers fix their response headers first and only then decide the
//! status and body, so error responses carry the same headers as successes.

use axum::{
    extract::{Extension, Path, Query},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use newsdesk_core::NewsPage;
use newsdesk_infra::NewsStore;

use crate::app::{dto, errors, SharedStore};
use crate::context::RequestId;

/// `GET|OPTIONS /news/:n` — the `n` most recent posts as a bare JSON array.
///
/// `OPTIONS` is a CORS pre-flight: headers only, empty body. A non-numeric
/// or negative `n` is rejected before storage is touched; storage failures
/// return the raw error text.
pub async fn recent_news(
    Extension(store): Extension<SharedStore>,
    Extension(request_id): Extension<RequestId>,
    method: Method,
    Path(n): Path<String>,
) -> Response {
    let headers = errors::news_headers();
    if method == Method::OPTIONS {
        return (StatusCode::OK, headers).into_response();
    }

    let n: u64 = match n.parse() {
        Ok(v) => v,
        Err(_) => return errors::news_error(headers, StatusCode::BAD_REQUEST, errors::INVALID_N),
    };

    match store.recent(n).await {
        Ok(posts) => (StatusCode::OK, headers, Json(posts)).into_response(),
        Err(e) => {
            tracing::warn!(request_id = %request_id, n, error = %e, "recent news query failed");
            errors::news_error(headers, StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// `GET /news?q=&page=&limit=` — paginated listing, or title search when `q`
/// is non-empty, wrapped in the pagination envelope.
///
/// Storage failures are logged and answered with a generic message.
pub async fn list_news(
    Extension(store): Extension<SharedStore>,
    Extension(request_id): Extension<RequestId>,
    query: Option<Query<Vec<(String, String)>>>,
) -> Response {
    let headers = errors::news_headers();

    let params = query
        .map(|Query(pairs)| dto::ListNewsParams::from_pairs(&pairs))
        .unwrap_or_default();
    let page = params.page;

    let result = match params.q.as_deref() {
        Some(q) => store.search(q, page.offset(), page.limit()).await,
        None => store.page(page.offset(), page.limit()).await,
    };

    match result {
        Ok(slice) => {
            let body = NewsPage::new(slice.posts, page, slice.total);
            (StatusCode::OK, headers, Json(body)).into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                q = params.q.as_deref().unwrap_or(""),
                page = page.page(),
                limit = page.limit(),
                error = %e,
                "news listing failed"
            );
            errors::news_error(headers, StatusCode::INTERNAL_SERVER_ERROR, errors::NEWS_FETCH_FAILED)
        }
    }
}
