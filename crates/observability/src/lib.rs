//! Tracing and logging setup shared by newsdesk binaries.

/// Initialize process-wide observability (tracing/logging).
///
/// Output format comes from `LOG_FORMAT` (`json` or `pretty`, default
/// `json`). This is safe to call multiple times; subsequent calls become
/// no-ops.
pub fn init() {
    let format = std::env::var("LOG_FORMAT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_default();
    tracing::init(format);
}

/// Tracing subscriber configuration (filters, output format).
pub mod tracing;

pub use tracing::LogFormat;
