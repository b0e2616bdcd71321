//! Infrastructure layer: the storage gateway over the `news` table.

pub mod store;

pub use store::{
    InMemoryNewsStore, NewsStore, PostSlice, PostgresNewsStore, StorageError, DEFAULT_RECENT,
};
