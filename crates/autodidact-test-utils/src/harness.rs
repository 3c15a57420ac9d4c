// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end engine tests.
//!
//! `TestHarness` assembles a complete engine over an in-memory backend and
//! mock providers, with teacher timings short enough for tests.

use std::sync::Arc;
use std::time::Duration;

use autodidact_config::model::{IndexConfig, TopicOrder};
use autodidact_core::{AutodidactError, KnowledgeEntry, Language};
use autodidact_engine::{Engine, EngineParts, ModeRequest, QueryRequest, QueryResponse};
use autodidact_providers::{ProviderSet, ProviderSlot};
use autodidact_storage::MemoryBackend;
use autodidact_teacher::{TeacherSettings, Topic};

use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    providers: Vec<Arc<MockProvider>>,
    entries: Vec<KnowledgeEntry>,
    index: IndexConfig,
    topics: Vec<Topic>,
    learning: bool,
    interval: Duration,
    failure_backoff: Duration,
    skip_delay: Duration,
    call_timeout: Duration,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            providers: Vec::new(),
            entries: Vec::new(),
            index: IndexConfig::default(),
            topics: Vec::new(),
            learning: false,
            interval: Duration::from_millis(10),
            failure_backoff: Duration::from_millis(20),
            skip_delay: Duration::from_millis(5),
            call_timeout: Duration::from_secs(2),
        }
    }

    /// Add a provider at the lowest priority.
    pub fn with_provider(mut self, provider: Arc<MockProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Start from this corpus instead of the bootstrap seed.
    pub fn with_entries(mut self, entries: Vec<KnowledgeEntry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.index.fuzzy_threshold = threshold;
        self
    }

    /// Teacher topics, walked sequentially.
    pub fn with_topics(mut self, topics: Vec<Topic>) -> Self {
        self.topics = topics;
        self
    }

    /// Enter learning mode once built.
    pub fn learning(mut self, learning: bool) -> Self {
        self.learning = learning;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_failure_backoff(mut self, backoff: Duration) -> Self {
        self.failure_backoff = backoff;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub async fn build(self) -> TestHarness {
        let backend = Arc::new(MemoryBackend::with_entries(self.entries));

        let mut providers = ProviderSet::new();
        for provider in &self.providers {
            providers.push(
                ProviderSlot::new(provider.clone(), self.call_timeout)
                    .with_interval(Some(self.interval)),
            );
        }

        let engine = Engine::from_parts(EngineParts {
            backend: backend.clone(),
            providers,
            index: self.index,
            teacher: TeacherSettings {
                interval: self.interval,
                failure_backoff: self.failure_backoff,
                skip_delay: self.skip_delay,
                topic_order: TopicOrder::Sequential,
                instruction: "Answer briefly.".to_string(),
            },
            topics: self.topics,
        })
        .await;

        if self.learning {
            engine
                .set_mode(ModeRequest {
                    learning_enabled: true,
                })
                .await;
        }

        TestHarness {
            engine,
            backend,
            providers: self.providers,
        }
    }
}

/// A complete engine over mock providers and an in-memory backend.
pub struct TestHarness {
    pub engine: Engine,
    /// The backend, for inspecting what was persisted.
    pub backend: Arc<MemoryBackend>,
    /// The mock providers, in priority order.
    pub providers: Vec<Arc<MockProvider>>,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Query the engine.
    pub async fn ask(&self, question: &str) -> Result<QueryResponse, AutodidactError> {
        self.engine
            .query(QueryRequest {
                question: question.to_string(),
            })
            .await
    }

    /// Total calls across every mock provider.
    pub fn total_provider_calls(&self) -> usize {
        self.providers.iter().map(|p| p.call_count()).sum()
    }

    /// Poll until `predicate` holds or `timeout` elapses.
    pub async fn wait_until<F, Fut>(&self, timeout: Duration, mut predicate: F) -> bool
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = bool>,
    {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            if predicate().await {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        predicate().await
    }
}

/// An English `general` entry, for building test corpora.
pub fn entry(question: &str, answer: &str) -> KnowledgeEntry {
    KnowledgeEntry::new(question, answer, "general", Language::En)
}
