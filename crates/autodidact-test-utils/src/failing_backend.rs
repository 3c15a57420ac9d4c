// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Corpus backend that always fails, for storage-outage tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use autodidact_core::{AutodidactError, CorpusBackend, KnowledgeEntry};

#[derive(Debug, Default)]
pub struct FailingBackend {
    persist_attempts: AtomicUsize,
}

impl FailingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn persist_attempts(&self) -> usize {
        self.persist_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CorpusBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    async fn load(&self) -> Result<Vec<KnowledgeEntry>, AutodidactError> {
        Err(AutodidactError::storage(std::io::Error::other(
            "storage unavailable",
        )))
    }

    async fn persist(&self, _entries: &[KnowledgeEntry]) -> Result<(), AutodidactError> {
        self.persist_attempts.fetch_add(1, Ordering::SeqCst);
        Err(AutodidactError::storage(std::io::Error::other(
            "storage unavailable",
        )))
    }
}
