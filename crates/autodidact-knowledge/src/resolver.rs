// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Multi-stage question resolution.
//!
//! 1. **Exact**: the normalized question is a stored key (confidence 1.0).
//! 2. **Fuzzy**: the best index score is above the threshold (confidence = score).
//! 3. **Provider**: learning mode only; providers are asked in priority order
//!    and the first answer is stored and returned.
//! 4. **Generated**: a canned keyword-group reply, `found = false`.

use std::sync::Arc;

use autodidact_core::metrics::{record_learned, record_resolution};
use autodidact_core::types::{CATEGORY_GENERATED, CATEGORY_UNKNOWN};
use autodidact_core::{AnswerSource, KnowledgeEntry, Resolution};
use autodidact_providers::ProviderSet;
use tracing::debug;

use crate::fallback::canned_reply;
use crate::language::detect_language;
use crate::store::KnowledgeStore;

/// Confidence reported for answers fetched from a provider mid-query.
pub const PROVIDER_CONFIDENCE: f64 = 0.4;

/// Answers questions from the store, falling back to providers.
pub struct Resolver {
    store: Arc<KnowledgeStore>,
    providers: ProviderSet,
    threshold: f64,
    instruction: String,
}

impl Resolver {
    pub fn new(
        store: Arc<KnowledgeStore>,
        providers: ProviderSet,
        threshold: f64,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            store,
            providers,
            threshold,
            instruction: instruction.into(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn store(&self) -> &Arc<KnowledgeStore> {
        &self.store
    }

    /// Resolve `question`. Provider fallback runs only when `learning` is set.
    ///
    /// Never fails: provider outages degrade to the generated reply.
    pub async fn resolve(&self, question: &str, learning: bool) -> Resolution {
        let resolution = self.resolve_inner(question, learning).await;
        record_resolution(resolution.source);
        debug!(
            source = %resolution.source,
            confidence = resolution.confidence,
            found = resolution.found,
            "query resolved"
        );
        resolution
    }

    async fn resolve_inner(&self, question: &str, learning: bool) -> Resolution {
        if let Some(entry) = self.store.get(question).await {
            return from_entry(entry, 1.0, AnswerSource::Exact);
        }

        if let Some((entry, score)) = self.store.best_match(question).await {
            if score > self.threshold {
                return from_entry(entry, score, AnswerSource::Fuzzy);
            }
            debug!(score, threshold = self.threshold, "best match below threshold");
        }

        let language = detect_language(question);

        if learning && !self.providers.is_empty() {
            let topic = question.trim();
            if let Some((provider, answer)) = self.providers.ask_first(topic, &self.instruction).await
            {
                if self
                    .store
                    .add(topic, &answer, CATEGORY_GENERATED, language)
                    .await
                {
                    record_learned("fallback");
                }
                debug!(provider = %provider, "answer fetched from provider");
                return Resolution {
                    answer,
                    confidence: PROVIDER_CONFIDENCE,
                    source: AnswerSource::Provider,
                    found: true,
                    category: CATEGORY_GENERATED.to_string(),
                    language,
                };
            }
        }

        Resolution {
            answer: canned_reply(question, language).to_string(),
            confidence: 0.0,
            source: AnswerSource::Generated,
            found: false,
            category: CATEGORY_UNKNOWN.to_string(),
            language,
        }
    }
}

fn from_entry(entry: KnowledgeEntry, confidence: f64, source: AnswerSource) -> Resolution {
    Resolution {
        answer: entry.answer,
        confidence,
        source,
        found: true,
        category: entry.category,
        language: entry.language,
    }
}
