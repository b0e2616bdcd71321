//! HTTP API: routing, request logging, and request/response mapping for the
//! news feed.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
