// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable corpus backends for the Autodidact knowledge store.
//!
//! - **SqliteBackend**: one row per entry, written in a single transaction
//! - **JsonFileBackend**: a JSON document replaced atomically on every write
//! - **MemoryBackend**: no durability, for tests and memory-only operation

pub mod json_file;
pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use autodidact_config::model::{StorageBackendKind, StorageConfig};
use autodidact_core::{AutodidactError, CorpusBackend};
use tracing::info;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

/// Open the backend selected by configuration.
pub async fn open_backend(
    config: &StorageConfig,
) -> Result<Arc<dyn CorpusBackend>, AutodidactError> {
    let backend: Arc<dyn CorpusBackend> = match config.backend {
        StorageBackendKind::Sqlite => {
            Arc::new(SqliteBackend::open(&config.path, config.wal_mode).await?)
        }
        StorageBackendKind::Json => Arc::new(JsonFileBackend::new(&config.path)),
        StorageBackendKind::Memory => Arc::new(MemoryBackend::new()),
    };
    info!(backend = backend.name(), path = %config.path, "corpus backend opened");
    Ok(backend)
}
