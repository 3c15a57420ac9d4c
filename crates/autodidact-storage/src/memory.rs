// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory backend.

use async_trait::async_trait;
use autodidact_core::{AutodidactError, CorpusBackend, KnowledgeEntry};
use tokio::sync::Mutex;

/// Keeps the last persisted snapshot in memory.
///
/// Useful for tests (the snapshot can be inspected) and for running without
/// any durable storage.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    snapshot: Mutex<Vec<KnowledgeEntry>>,
    writes: Mutex<u64>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-populated corpus.
    pub fn with_entries(entries: Vec<KnowledgeEntry>) -> Self {
        Self {
            snapshot: Mutex::new(entries),
            writes: Mutex::new(0),
        }
    }

    /// The most recently persisted corpus.
    pub async fn snapshot(&self) -> Vec<KnowledgeEntry> {
        self.snapshot.lock().await.clone()
    }

    /// How many times `persist` has been called.
    pub async fn write_count(&self) -> u64 {
        *self.writes.lock().await
    }
}

#[async_trait]
impl CorpusBackend for MemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load(&self) -> Result<Vec<KnowledgeEntry>, AutodidactError> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn persist(&self, entries: &[KnowledgeEntry]) -> Result<(), AutodidactError> {
        *self.snapshot.lock().await = entries.to_vec();
        *self.writes.lock().await += 1;
        Ok(())
    }
}
