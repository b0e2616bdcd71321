use std::cmp::Reverse;
use std::sync::RwLock;

use newsdesk_core::{NewPost, Post, PostId};

use super::{NewsStore, PostSlice, StorageError, recent_limit};

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Post>,
    last_id: i64,
}

/// In-memory `news` table.
///
/// Intended for tests/dev. Mirrors the Postgres table: ids are assigned
/// sequentially from 1 and `link` is unique.
#[derive(Debug, Default)]
pub struct InMemoryNewsStore {
    table: RwLock<Table>,
}

impl InMemoryNewsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows currently stored (any order).
    pub fn len(&self) -> usize {
        // Rows are only pushed after validation, so a poisoned table is still consistent.
        match self.table.read() {
            Ok(table) => table.rows.len(),
            Err(poisoned) => poisoned.into_inner().rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sorted<F>(&self, filter: F) -> Result<Vec<Post>, StorageError>
    where
        F: Fn(&Post) -> bool,
    {
        let table = self
            .table
            .read()
            .map_err(|_| StorageError::Unavailable("lock poisoned".to_string()))?;

        let mut posts: Vec<Post> = table.rows.iter().filter(|p| filter(*p)).cloned().collect();
        posts.sort_by_key(|p| Reverse((p.pub_time, p.id)));
        Ok(posts)
    }

    fn slice(posts: Vec<Post>, offset: u64, limit: u64) -> PostSlice {
        let total = posts.len() as u64;
        let posts = posts
            .into_iter()
            .skip(to_usize(offset))
            .take(to_usize(limit))
            .collect();
        PostSlice { posts, total }
    }
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait::async_trait]
impl NewsStore for InMemoryNewsStore {
    async fn recent(&self, n: u64) -> Result<Vec<Post>, StorageError> {
        let mut posts = self.sorted(|_| true)?;
        posts.truncate(to_usize(recent_limit(n)));
        Ok(posts)
    }

    async fn all(&self) -> Result<Vec<Post>, StorageError> {
        self.sorted(|_| true)
    }

    async fn page(&self, offset: u64, limit: u64) -> Result<PostSlice, StorageError> {
        Ok(Self::slice(self.sorted(|_| true)?, offset, limit))
    }

    async fn search(
        &self,
        query: &str,
        offset: u64,
        limit: u64,
    ) -> Result<PostSlice, StorageError> {
        let needle = query.to_lowercase();
        let matches = self.sorted(|p| p.title.to_lowercase().contains(&needle))?;
        Ok(Self::slice(matches, offset, limit))
    }

    async fn insert(&self, posts: &[NewPost]) -> Result<(), StorageError> {
        for post in posts {
            // One lock per row: earlier rows stay visible if a later one fails.
            let mut table = self
                .table
                .write()
                .map_err(|_| StorageError::Unavailable("lock poisoned".to_string()))?;

            if table.rows.iter().any(|p| p.link == post.link) {
                return Err(StorageError::Conflict(format!(
                    "duplicate key value violates unique constraint on link: {}",
                    post.link
                )));
            }

            table.last_id += 1;
            let id = PostId::new(table.last_id);
            table.rows.push(post.clone().into_post(id));
        }
        Ok(())
    }
}
