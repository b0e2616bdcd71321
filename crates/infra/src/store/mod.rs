//! Storage gateway for news posts.
//!
//! `NewsStore` is the only seam between HTTP handlers and the database. The
//! Postgres implementation is used in production; the in-memory one backs
//! local development and tests with the same ordering and paging rules.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use newsdesk_core::{NewPost, Post};
use thiserror::Error;

pub use in_memory::InMemoryNewsStore;
pub use postgres::PostgresNewsStore;

/// Number of posts returned by `recent(0)`.
pub const DEFAULT_RECENT: u64 = 10;

/// Resolve the row count for a "recent posts" request (`0` means the default).
pub fn recent_limit(n: u64) -> u64 {
    if n == 0 { DEFAULT_RECENT } else { n }
}

/// A page of posts plus the total number of rows matching the same filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostSlice {
    pub posts: Vec<Post>,
    pub total: u64,
}

/// Storage operation error.
///
/// The `Display` text is what callers see as the "raw" error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The store could not be reached (pool closed/exhausted, I/O, TLS).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A statement failed to execute.
    #[error("query failed: {0}")]
    Query(String),

    /// A uniqueness constraint rejected the row.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A row could not be mapped to a `Post`.
    #[error("failed to decode row: {0}")]
    Decode(String),
}

/// Read/write access to the `news` table.
///
/// All reads are ordered newest first (`pub_time` descending, ties broken by
/// id descending). Implementations must be safe to call concurrently; each
/// call is independent.
#[async_trait::async_trait]
pub trait NewsStore: Send + Sync {
    /// Up to `n` most recent posts; `n == 0` returns [`DEFAULT_RECENT`].
    async fn recent(&self, n: u64) -> Result<Vec<Post>, StorageError>;

    /// Every post.
    async fn all(&self) -> Result<Vec<Post>, StorageError>;

    /// One page of all posts plus the unfiltered row count.
    async fn page(&self, offset: u64, limit: u64) -> Result<PostSlice, StorageError>;

    /// One page of posts whose title contains `query` (case-insensitive),
    /// plus the number of matching rows. Content is not searched, and `%`/`_`
    /// in `query` match themselves rather than acting as wildcards.
    async fn search(&self, query: &str, offset: u64, limit: u64)
        -> Result<PostSlice, StorageError>;

    /// Insert each post as its own statement.
    ///
    /// Not atomic: stops at the first failing row and returns its error;
    /// rows before it stay committed.
    async fn insert(&self, posts: &[NewPost]) -> Result<(), StorageError>;
}

#[async_trait::async_trait]
impl<S> NewsStore for Arc<S>
where
    S: NewsStore + ?Sized,
{
    async fn recent(&self, n: u64) -> Result<Vec<Post>, StorageError> {
        (**self).recent(n).await
    }

    async fn all(&self) -> Result<Vec<Post>, StorageError> {
        (**self).all().await
    }

    async fn page(&self, offset: u64, limit: u64) -> Result<PostSlice, StorageError> {
        (**self).page(offset, limit).await
    }

    async fn search(
        &self,
        query: &str,
        offset: u64,
        limit: u64,
    ) -> Result<PostSlice, StorageError> {
        (**self).search(query, offset, limit).await
    }

    async fn insert(&self, posts: &[NewPost]) -> Result<(), StorageError> {
        (**self).insert(posts).await
    }
}
