//! Storage wiring: picks the Postgres store when `DATABASE_URL` is set,
//! otherwise the in-memory store (dev only).

use std::sync::Arc;

use newsdesk_infra::{InMemoryNewsStore, PostgresNewsStore, StorageError};

use crate::app::SharedStore;
use crate::config::Config;

/// Build the process-wide store handle (one connection pool per process).
pub async fn build_store(config: &Config) -> Result<SharedStore, StorageError> {
    match &config.database_url {
        Some(url) => {
            let store = PostgresNewsStore::connect(url, config.max_connections).await?;
            tracing::info!(max_connections = config.max_connections, "connected to postgres");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory news store");
            Ok(Arc::new(InMemoryNewsStore::new()))
        }
    }
}
