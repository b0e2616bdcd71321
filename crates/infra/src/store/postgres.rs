//! Postgres-backed news store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Code | StorageError |
//! |------------|-----------------|--------------|
//! | Database (unique violation) | `23505` | `Conflict` |
//! | Database (other) | any | `Query` |
//! | PoolClosed / PoolTimedOut / Io / Tls | N/A | `Unavailable` |
//! | ColumnDecode / ColumnNotFound / Decode | N/A | `Decode` |
//! | Other | N/A | `Query` |
//!
//! ## Thread Safety
//!
//! `PostgresNewsStore` is `Send + Sync`; each call borrows a connection from
//! the SQLx pool for the duration of one statement.

use std::sync::Arc;

use newsdesk_core::{NewPost, Post, PostId};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use super::{NewsStore, PostSlice, StorageError, recent_limit};

/// Postgres-backed `news` table.
#[derive(Debug, Clone)]
pub struct PostgresNewsStore {
    pool: Arc<PgPool>,
}

impl PostgresNewsStore {
    /// Wrap an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool against `database_url` with at most `max_connections`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    async fn fetch_posts(
        &self,
        operation: &str,
        query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
    ) -> Result<Vec<Post>, StorageError> {
        let rows = query
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in rows {
            let post = PostRow::from_row(&row)
                .map_err(|e| StorageError::Decode(format!("failed to decode news row: {e}")))?;
            posts.push(post.into());
        }
        Ok(posts)
    }

    async fn count(
        &self,
        operation: &str,
        query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
    ) -> Result<u64, StorageError> {
        let row = query
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| StorageError::Decode(format!("failed to read count: {e}")))?;
        Ok(total.max(0) as u64)
    }
}

#[async_trait::async_trait]
impl NewsStore for PostgresNewsStore {
    #[instrument(skip(self), err)]
    async fn recent(&self, n: u64) -> Result<Vec<Post>, StorageError> {
        self.fetch_posts(
            "recent",
            sqlx::query(
                r#"
                SELECT id, title, content, pub_time, link
                FROM news
                ORDER BY pub_time DESC, id DESC
                LIMIT $1
                "#,
            )
            .bind(to_i64(recent_limit(n))),
        )
        .await
    }

    #[instrument(skip(self), err)]
    async fn all(&self) -> Result<Vec<Post>, StorageError> {
        self.fetch_posts(
            "all",
            sqlx::query(
                r#"
                SELECT id, title, content, pub_time, link
                FROM news
                ORDER BY pub_time DESC, id DESC
                "#,
            ),
        )
        .await
    }

    #[instrument(skip(self), err)]
    async fn page(&self, offset: u64, limit: u64) -> Result<PostSlice, StorageError> {
        let posts = self
            .fetch_posts(
                "page",
                sqlx::query(
                    r#"
                    SELECT id, title, content, pub_time, link
                    FROM news
                    ORDER BY pub_time DESC, id DESC
                    OFFSET $1 LIMIT $2
                    "#,
                )
                .bind(to_i64(offset))
                .bind(to_i64(limit)),
            )
            .await?;

        let total = self
            .count("count", sqlx::query("SELECT COUNT(*) AS total FROM news"))
            .await?;

        Ok(PostSlice { posts, total })
    }

    #[instrument(skip(self), err)]
    async fn search(
        &self,
        query: &str,
        offset: u64,
        limit: u64,
    ) -> Result<PostSlice, StorageError> {
        let pattern = like_pattern(query);

        let posts = self
            .fetch_posts(
                "search",
                sqlx::query(
                    r#"
                    SELECT id, title, content, pub_time, link
                    FROM news
                    WHERE title ILIKE $1 ESCAPE '\'
                    ORDER BY pub_time DESC, id DESC
                    OFFSET $2 LIMIT $3
                    "#,
                )
                .bind(&pattern)
                .bind(to_i64(offset))
                .bind(to_i64(limit)),
            )
            .await?;

        let total = self
            .count(
                "count_search",
                sqlx::query(r"SELECT COUNT(*) AS total FROM news WHERE title ILIKE $1 ESCAPE '\'")
                    .bind(&pattern),
            )
            .await?;

        Ok(PostSlice { posts, total })
    }

    #[instrument(skip(self, posts), fields(post_count = posts.len()), err)]
    async fn insert(&self, posts: &[NewPost]) -> Result<(), StorageError> {
        // One statement per row, no transaction.
        for (idx, post) in posts.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO news (title, content, pub_time, link)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(&post.title)
            .bind(&post.content)
            .bind(post.pub_time)
            .bind(&post.link)
            .execute(&*self.pool)
            .await
            .map_err(|e| {
                tracing::warn!(index = idx, link = %post.link, "insert stopped at failing row");
                map_sqlx_error("insert", e)
            })?;
        }
        Ok(())
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// `%query%` with `\`, `%` and `_` escaped so the query matches literally.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Debug)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    pub_time: i64,
    link: String,
}

impl<'r> FromRow<'r, PgRow> for PostRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(PostRow {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            pub_time: row.try_get("pub_time")?,
            link: row.try_get("link")?,
        })
    }
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: PostId::new(row.id),
            title: row.title,
            content: row.content,
            pub_time: row.pub_time,
            link: row.link,
        }
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StorageError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code() {
                Some(code) if code.as_ref() == "23505" => StorageError::Conflict(msg),
                _ => StorageError::Query(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            StorageError::Unavailable(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            StorageError::Unavailable(format!("timed out acquiring connection in {}", operation))
        }
        sqlx::Error::Io(e) => StorageError::Unavailable(format!("i/o error in {}: {}", operation, e)),
        sqlx::Error::Tls(e) => StorageError::Unavailable(format!("tls error in {}: {}", operation, e)),
        err @ (sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_)) => {
            StorageError::Decode(format!("{} in {}", err, operation))
        }
        _ => StorageError::Query(format!("sqlx error in {}: {}", operation, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_are_unavailable() {
        assert!(matches!(
            map_sqlx_error("recent", sqlx::Error::PoolClosed),
            StorageError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error("recent", sqlx::Error::PoolTimedOut),
            StorageError::Unavailable(_)
        ));
    }

    #[test]
    fn decode_errors_keep_operation_name() {
        let err = map_sqlx_error("page", sqlx::Error::ColumnNotFound("pub_time".to_string()));
        match err {
            StorageError::Decode(msg) => assert!(msg.contains("page")),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn offsets_beyond_i64_saturate() {
        assert_eq!(to_i64(u64::MAX), i64::MAX);
        assert_eq!(to_i64(25), 25);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%"), r"%100\%%");
        assert_eq!(like_pattern("snake_case"), r"%snake\_case%");
        assert_eq!(like_pattern(r"C:\dir"), r"%C:\\dir%");
    }
}
