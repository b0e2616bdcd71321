//! HTTP API application wiring (Axum router + store wiring).
//!
//! - `services.rs`: storage wiring (Postgres or in-memory)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: query-string parsing
//! - `errors.rs`: response headers and error bodies

use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use newsdesk_infra::NewsStore;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Shared storage handle passed to every handler.
pub type SharedStore = Arc<dyn NewsStore>;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Unmatched paths fall through to static files under `webapp_dir`. Every
/// request, static or not, passes through the request logger.
pub fn build_app(store: SharedStore, webapp_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(store))
        .fallback_service(ServeDir::new(webapp_dir.as_ref()))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::request_logger)))
}
