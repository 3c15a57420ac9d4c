// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable corpus storage trait.

use async_trait::async_trait;

use crate::error::AutodidactError;
use crate::types::KnowledgeEntry;

/// Durable home of the knowledge corpus.
///
/// The store always writes the whole corpus, in insertion order, after each
/// mutation. Backends must preserve that order on `load`.
#[async_trait]
pub trait CorpusBackend: Send + Sync + 'static {
    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    /// Load every persisted entry in insertion order.
    async fn load(&self) -> Result<Vec<KnowledgeEntry>, AutodidactError>;

    /// Replace the persisted corpus with `entries`.
    async fn persist(&self, entries: &[KnowledgeEntry]) -> Result<(), AutodidactError>;
}
