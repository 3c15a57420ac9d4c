// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The knowledge store: an insertion-ordered, deduplicated corpus with its
//! similarity index.
//!
//! Entries and index live under one `RwLock`. Every mutation holds the write
//! lock while it updates the entries, rebuilds the index, and writes the
//! corpus to the backend, so readers never see the two out of step.
//! Backend failures are logged; the in-memory corpus stays authoritative.
//! A store whose initial load failed never writes to its backend.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use autodidact_config::model::IndexConfig;
use autodidact_core::metrics::record_learned;
use autodidact_core::{
    AutodidactError, CorpusBackend, KnowledgeEntry, Language, normalize_question,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::index::SimilarityIndex;
use crate::seed::bootstrap_entries;

/// Result of [`KnowledgeStore::overwrite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

/// Per-category and per-language breakdown of the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub entry_count: usize,
    pub categories: BTreeMap<String, usize>,
    pub languages: BTreeMap<String, usize>,
    /// Whether a similarity index currently exists.
    pub index_built: bool,
}

#[derive(Default)]
struct Corpus {
    entries: Vec<KnowledgeEntry>,
    positions: HashMap<String, usize>,
    index: Option<SimilarityIndex>,
}

impl Corpus {
    fn from_entries(entries: Vec<KnowledgeEntry>, config: &IndexConfig) -> Self {
        let mut corpus = Self::default();
        for mut entry in entries {
            entry.question = normalize_question(&entry.question);
            entry.answer = entry.answer.trim().to_string();
            if entry.question.is_empty() || entry.answer.is_empty() {
                warn!("blank question or answer in stored corpus, skipping");
                continue;
            }
            if corpus.positions.contains_key(&entry.question) {
                warn!(question = %entry.question, "duplicate question in stored corpus, keeping first");
                continue;
            }
            corpus
                .positions
                .insert(entry.question.clone(), corpus.entries.len());
            corpus.entries.push(entry);
        }
        corpus.rebuild_index(config);
        corpus
    }

    fn rebuild_index(&mut self, config: &IndexConfig) {
        let questions: Vec<&str> = self.entries.iter().map(|e| e.question.as_str()).collect();
        self.index = SimilarityIndex::build(&questions, config);
    }

    fn reindex_positions(&mut self) {
        self.positions = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.question.clone(), i))
            .collect();
    }
}

/// Durable, deduplicated collection of knowledge entries.
pub struct KnowledgeStore {
    backend: Arc<dyn CorpusBackend>,
    index_config: IndexConfig,
    corpus: RwLock<Corpus>,
    /// Cleared when the initial load failed, so unreadable data is never
    /// overwritten.
    durable: bool,
}

impl KnowledgeStore {
    /// Load the corpus from `backend`, seeding the bootstrap set when empty.
    ///
    /// If the load fails the store runs on the bootstrap set in memory only:
    /// nothing is written back, so the stored corpus is left as it was.
    pub async fn open(backend: Arc<dyn CorpusBackend>, index_config: IndexConfig) -> Self {
        let loaded = match backend.load().await {
            Ok(entries) => Some(entries),
            Err(e) => {
                warn!(
                    backend = backend.name(),
                    error = %e,
                    "failed to load corpus, running in memory only without persisting"
                );
                None
            }
        };

        let durable = loaded.is_some();
        let loaded = loaded.unwrap_or_default();
        let seeded = loaded.is_empty();
        let entries = if seeded { bootstrap_entries() } else { loaded };
        let corpus = Corpus::from_entries(entries, &index_config);

        let store = Self {
            backend,
            index_config,
            corpus: RwLock::new(corpus),
            durable,
        };

        if seeded {
            let corpus = store.corpus.read().await;
            for _ in &corpus.entries {
                record_learned("seed");
            }
            info!(count = corpus.entries.len(), "seeded bootstrap knowledge");
            store.persist(&corpus.entries).await;
        }

        {
            let corpus = store.corpus.read().await;
            info!(
                entries = corpus.entries.len(),
                indexed = corpus.index.is_some(),
                backend = store.backend.name(),
                durable = store.durable,
                "knowledge store ready"
            );
        }
        store
    }

    /// Whether mutations are written to the backend.
    pub fn is_durable(&self) -> bool {
        self.durable
    }

    async fn persist(&self, entries: &[KnowledgeEntry]) {
        if !self.durable {
            return;
        }
        if let Err(e) = self.backend.persist(entries).await {
            warn!(backend = self.backend.name(), error = %e, "failed to persist corpus");
        }
    }

    /// Insert a new entry. Returns `false` if the normalized question is
    /// already stored, or if the question or answer is blank.
    pub async fn add(
        &self,
        question: &str,
        answer: &str,
        category: &str,
        language: Language,
    ) -> bool {
        let entry = KnowledgeEntry::new(question, answer, category, language);
        if entry.question.is_empty() || entry.answer.is_empty() {
            debug!("rejected entry with blank question or answer");
            return false;
        }

        let mut corpus = self.corpus.write().await;
        if corpus.positions.contains_key(&entry.question) {
            debug!(question = %entry.question, "already known");
            return false;
        }

        let position = corpus.entries.len();
        corpus.positions.insert(entry.question.clone(), position);
        debug!(question = %entry.question, category = %entry.category, "learned");
        corpus.entries.push(entry);
        corpus.rebuild_index(&self.index_config);
        self.persist(&corpus.entries).await;
        true
    }

    /// Replace the answer and category of an existing entry, keeping its key,
    /// creation time and position, or insert it if absent.
    pub async fn overwrite(
        &self,
        question: &str,
        answer: &str,
        category: &str,
        language: Language,
    ) -> Result<UpsertOutcome, AutodidactError> {
        let entry = KnowledgeEntry::new(question, answer, category, language);
        if entry.question.is_empty() || entry.answer.is_empty() {
            return Err(AutodidactError::InvalidInput(
                "question and answer must not be blank".into(),
            ));
        }

        let mut corpus = self.corpus.write().await;
        let outcome = match corpus.positions.get(&entry.question).copied() {
            Some(position) => {
                let existing = &mut corpus.entries[position];
                existing.answer = entry.answer;
                existing.category = entry.category;
                existing.language = entry.language;
                UpsertOutcome::Replaced
            }
            None => {
                let position = corpus.entries.len();
                corpus.positions.insert(entry.question.clone(), position);
                corpus.entries.push(entry);
                corpus.rebuild_index(&self.index_config);
                UpsertOutcome::Inserted
            }
        };
        self.persist(&corpus.entries).await;
        Ok(outcome)
    }

    /// Exact lookup by normalized question.
    pub async fn get(&self, question: &str) -> Option<KnowledgeEntry> {
        let key = normalize_question(question);
        let corpus = self.corpus.read().await;
        corpus
            .positions
            .get(&key)
            .map(|&position| corpus.entries[position].clone())
    }

    pub async fn contains(&self, question: &str) -> bool {
        let key = normalize_question(question);
        self.corpus.read().await.positions.contains_key(&key)
    }

    /// Insertion-ordered snapshot of every entry.
    pub async fn all(&self) -> Vec<KnowledgeEntry> {
        self.corpus.read().await.entries.clone()
    }

    /// Remove an entry. Returns `false` if it was not stored.
    pub async fn delete(&self, question: &str) -> bool {
        let key = normalize_question(question);
        let mut corpus = self.corpus.write().await;
        let Some(position) = corpus.positions.get(&key).copied() else {
            return false;
        };

        corpus.entries.remove(position);
        corpus.reindex_positions();
        corpus.rebuild_index(&self.index_config);
        self.persist(&corpus.entries).await;
        debug!(question = %key, "deleted");
        true
    }

    pub async fn count(&self) -> usize {
        self.corpus.read().await.entries.len()
    }

    pub async fn is_indexed(&self) -> bool {
        self.corpus.read().await.index.is_some()
    }

    /// Most similar stored entry and its cosine score, if an index exists.
    pub async fn best_match(&self, text: &str) -> Option<(KnowledgeEntry, f64)> {
        let corpus = self.corpus.read().await;
        let (position, score) = corpus.index.as_ref()?.query(text)?;
        corpus
            .entries
            .get(position)
            .map(|entry| (entry.clone(), score))
    }

    /// Category and language breakdown.
    pub async fn stats(&self) -> CorpusStats {
        let corpus = self.corpus.read().await;
        let mut stats = CorpusStats {
            entry_count: corpus.entries.len(),
            index_built: corpus.index.is_some(),
            ..CorpusStats::default()
        };
        for entry in &corpus.entries {
            *stats.categories.entry(entry.category.clone()).or_default() += 1;
            *stats
                .languages
                .entry(entry.language.to_string())
                .or_default() += 1;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use autodidact_storage::MemoryBackend;
    use tracing_test::traced_test;

    use super::*;

    struct ReadOnlyBackend;

    #[async_trait]
    impl CorpusBackend for ReadOnlyBackend {
        fn name(&self) -> &str {
            "read-only"
        }

        async fn load(&self) -> Result<Vec<KnowledgeEntry>, AutodidactError> {
            Ok(vec![entry("seed", "x")])
        }

        async fn persist(&self, _entries: &[KnowledgeEntry]) -> Result<(), AutodidactError> {
            Err(AutodidactError::storage(std::io::Error::other("read-only file system")))
        }
    }

    fn entry(q: &str, a: &str) -> KnowledgeEntry {
        KnowledgeEntry::new(q, a, "general", Language::En)
    }

    async fn store_with(entries: Vec<KnowledgeEntry>) -> (KnowledgeStore, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::with_entries(entries));
        let store = KnowledgeStore::open(backend.clone(), IndexConfig::default()).await;
        (store, backend)
    }

    #[tokio::test]
    async fn empty_backend_is_seeded_and_persisted() {
        let (store, backend) = store_with(Vec::new()).await;
        assert_eq!(store.count().await, 26);
        assert!(store.is_indexed().await);
        assert_eq!(backend.snapshot().await.len(), 26);
    }

    #[tokio::test]
    async fn stored_questions_are_normalized_on_load() {
        let mut shouted = entry("placeholder", "x");
        shouted.question = "  What Is Lua ".into();
        shouted.answer = " A scripting language. \n".into();
        let mut blank = entry("placeholder", "x");
        blank.question = "   ".into();

        let (store, _) = store_with(vec![shouted, blank, entry("hi", "Hey!")]).await;
        assert_eq!(store.count().await, 2);
        assert_eq!(
            store.get("what is lua").await.unwrap().answer,
            "A scripting language."
        );
        assert!(!store.add("what is lua", "Other.", "general", Language::En).await);
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn existing_corpus_is_not_seeded() {
        let (store, backend) = store_with(vec![entry("a question", "an answer")]).await;
        assert_eq!(store.count().await, 1);
        assert!(!store.is_indexed().await);
        assert_eq!(backend.write_count().await, 0);
    }

    #[tokio::test]
    async fn add_then_duplicate_is_rejected() {
        let (store, _) = store_with(vec![entry("seed", "x")]).await;
        assert!(store.add("What is a loop", "Repeats code.", "lua_basics", Language::En).await);
        assert!(!store.add("  what is a LOOP ", "Different.", "lua_basics", Language::En).await);

        let stored = store.get("what is a loop").await.unwrap();
        assert_eq!(stored.answer, "Repeats code.");
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let (store, _) = store_with(vec![entry("seed", "x")]).await;
        assert!(!store.add("   ", "answer", "general", Language::En).await);
        assert!(!store.add("question", "  \n", "general", Language::En).await);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn every_mutation_persists() {
        let (store, backend) = store_with(vec![entry("seed", "x")]).await;
        store.add("one", "1", "general", Language::En).await;
        store.delete("one").await;
        assert_eq!(backend.write_count().await, 2);
        assert_eq!(backend.snapshot().await, store.all().await);
    }

    #[tokio::test]
    async fn delete_present_and_absent() {
        let (store, _) = store_with(vec![entry("a", "1"), entry("b", "2"), entry("c", "3")]).await;
        assert!(store.delete("B").await);
        assert!(store.get("b").await.is_none());
        assert!(!store.delete("b").await);

        let questions: Vec<String> = store.all().await.into_iter().map(|e| e.question).collect();
        assert_eq!(questions, vec!["a", "c"]);
        assert_eq!(store.get("c").await.unwrap().answer, "3");
        // two entries left: below the index floor
        assert!(!store.is_indexed().await);
    }

    #[tokio::test]
    async fn overwrite_keeps_position_and_created_at() {
        let (store, _) = store_with(vec![entry("a", "1"), entry("b", "2")]).await;
        let before = store.get("a").await.unwrap();

        let outcome = store
            .overwrite("A", "one", "user_taught", Language::En)
            .await
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Replaced);

        let all = store.all().await;
        assert_eq!(all[0].question, "a");
        assert_eq!(all[0].answer, "one");
        assert_eq!(all[0].category, "user_taught");
        assert_eq!(all[0].created_at, before.created_at);

        let outcome = store
            .overwrite("c", "3", "user_taught", Language::En)
            .await
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);
        assert_eq!(store.count().await, 3);
        assert!(store.is_indexed().await);
    }

    #[tokio::test]
    async fn overwrite_rejects_blank_answer() {
        let (store, _) = store_with(vec![entry("a", "1")]).await;
        let err = store
            .overwrite("a", " ", "user_taught", Language::En)
            .await
            .unwrap_err();
        assert!(matches!(err, AutodidactError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn concurrent_adds_of_same_question_store_one_entry() {
        let (store, _) = store_with(vec![entry("seed", "x")]).await;
        let store = Arc::new(store);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .add("what is a table", &format!("answer {i}"), "general", Language::En)
                        .await
                })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn best_match_needs_three_entries() {
        let (store, _) = store_with(vec![entry("what is a loop", "x"), entry("hi", "y")]).await;
        assert!(store.best_match("what is a loop").await.is_none());

        store.add("what is lua", "z", "general", Language::En).await;
        let (matched, score) = store.best_match("What is a loop?").await.unwrap();
        assert_eq!(matched.question, "what is a loop");
        assert!(score > 0.99);
    }

    #[tokio::test]
    async fn stats_break_down_categories_and_languages() {
        let (store, _) = store_with(Vec::new()).await;
        let stats = store.stats().await;
        assert_eq!(stats.entry_count, 26);
        assert_eq!(stats.categories["greeting"], 8);
        assert_eq!(stats.categories["executor"], 3);
        assert_eq!(stats.languages["tl"], 5);
        assert_eq!(stats.languages["en"], 21);
        assert!(stats.index_built);
    }

    #[tokio::test]
    #[traced_test]
    async fn persist_failure_is_logged_and_absorbed() {
        let store = KnowledgeStore::open(Arc::new(ReadOnlyBackend), IndexConfig::default()).await;
        assert!(store.add("new", "entry", "general", Language::En).await);
        assert_eq!(store.count().await, 2);
        assert!(logs_contain("failed to persist corpus"));
    }
}
