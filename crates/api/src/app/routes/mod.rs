use axum::{routing::get, Router};

pub mod news;
pub mod system;

/// Router for the news endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/news", get(news::list_news))
        .route("/news/:n", get(news::recent_news).options(news::recent_news))
}
