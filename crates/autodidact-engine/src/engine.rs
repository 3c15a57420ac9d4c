// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The [`Engine`] service object.
//!
//! Owns the store, resolver, providers, teacher pool and mode controller.
//! It is constructed explicitly and passed to whatever serves it; there is no
//! process-wide instance.

use std::sync::Arc;
use std::time::Duration;

use autodidact_config::model::{AutodidactConfig, IndexConfig};
use autodidact_core::metrics::{record_learned, register_metrics};
use autodidact_core::types::CATEGORY_USER_TAUGHT;
use autodidact_core::{AutodidactError, CorpusBackend};
use autodidact_knowledge::{KnowledgeStore, Resolver, UpsertOutcome, detect_language};
use autodidact_providers::ProviderSet;
use autodidact_storage::open_backend;
use autodidact_teacher::{ModeController, TeacherPool, TeacherSettings, Topic, topics_from_config};
use tracing::info;

use crate::api::{
    ForgetRequest, ModeRequest, ModeResponse, QueryRequest, QueryResponse, StatsResponse,
    TeachOutcome, TeachRequest,
};

/// Everything needed to assemble an engine without reading configuration.
pub struct EngineParts {
    pub backend: Arc<dyn CorpusBackend>,
    pub providers: ProviderSet,
    pub index: IndexConfig,
    pub teacher: TeacherSettings,
    pub topics: Vec<Topic>,
}

/// The self-expanding question-answering service.
pub struct Engine {
    store: Arc<KnowledgeStore>,
    resolver: Resolver,
    providers: ProviderSet,
    mode: ModeController,
}

impl Engine {
    /// Build the engine from validated configuration.
    ///
    /// Enters learning mode immediately if `engine.start_in_learning_mode`
    /// is set.
    pub async fn from_config(config: &AutodidactConfig) -> Result<Self, AutodidactError> {
        register_metrics();

        let backend = open_backend(&config.storage).await?;
        let providers = ProviderSet::from_config(
            &config.providers,
            Duration::from_secs(config.teacher.interval_secs),
        )?;

        let engine = Self::from_parts(EngineParts {
            backend,
            providers,
            index: config.index.clone(),
            teacher: TeacherSettings::from_config(&config.teacher),
            topics: topics_from_config(&config.teacher),
        })
        .await;

        if config.engine.start_in_learning_mode {
            engine.mode.set_mode(true).await;
        }
        info!(name = %config.engine.name, mode = %engine.mode.mode(), "engine ready");
        Ok(engine)
    }

    /// Assemble an engine from ready-made parts. Starts in test mode.
    pub async fn from_parts(parts: EngineParts) -> Self {
        let store = Arc::new(KnowledgeStore::open(parts.backend, parts.index.clone()).await);
        let resolver = Resolver::new(
            store.clone(),
            parts.providers.clone(),
            parts.index.fuzzy_threshold,
            parts.teacher.instruction.clone(),
        );
        let pool = Arc::new(TeacherPool::new(
            store.clone(),
            parts.providers.clone(),
            parts.topics,
            parts.teacher,
        ));

        Self {
            store,
            resolver,
            providers: parts.providers,
            mode: ModeController::new(pool),
        }
    }

    /// Answer a question. Providers are consulted only in learning mode.
    pub async fn query(&self, request: QueryRequest) -> Result<QueryResponse, AutodidactError> {
        self.resolve(request, self.mode.is_learning()).await
    }

    /// Answer a question with provider fallback enabled for this query only.
    ///
    /// The mode is left unchanged and no teacher workers are started.
    pub async fn query_with_providers(
        &self,
        request: QueryRequest,
    ) -> Result<QueryResponse, AutodidactError> {
        self.resolve(request, true).await
    }

    async fn resolve(
        &self,
        request: QueryRequest,
        learning: bool,
    ) -> Result<QueryResponse, AutodidactError> {
        if request.question.trim().is_empty() {
            return Err(AutodidactError::InvalidInput("question must not be blank".into()));
        }
        Ok(self.resolver.resolve(&request.question, learning).await)
    }

    /// Store a user-supplied answer. Existing answers are left untouched.
    pub async fn teach(&self, request: TeachRequest) -> Result<TeachOutcome, AutodidactError> {
        validate_pair(&request)?;
        let language = detect_language(&request.question);
        let learned = self
            .store
            .add(&request.question, &request.answer, CATEGORY_USER_TAUGHT, language)
            .await;
        if learned {
            record_learned("user");
            Ok(TeachOutcome::Learned)
        } else {
            Ok(TeachOutcome::Duplicate)
        }
    }

    /// Store a user-supplied answer, replacing any existing one.
    pub async fn override_answer(
        &self,
        request: TeachRequest,
    ) -> Result<UpsertOutcome, AutodidactError> {
        validate_pair(&request)?;
        let language = detect_language(&request.question);
        let outcome = self
            .store
            .overwrite(&request.question, &request.answer, CATEGORY_USER_TAUGHT, language)
            .await?;
        if outcome == UpsertOutcome::Inserted {
            record_learned("user");
        }
        Ok(outcome)
    }

    /// Remove a stored question. Returns whether anything was removed.
    pub async fn forget(&self, request: ForgetRequest) -> bool {
        self.store.delete(&request.question).await
    }

    /// Switch between learning and test mode.
    pub async fn set_mode(&self, request: ModeRequest) -> ModeResponse {
        ModeResponse {
            mode: self.mode.set_mode(request.learning_enabled).await,
        }
    }

    pub async fn stats(&self) -> StatsResponse {
        let corpus = self.store.stats().await;
        StatsResponse {
            entry_count: corpus.entry_count,
            provider_stats: self.providers.stats(),
            mode: self.mode.mode(),
            categories: corpus.categories,
            languages: corpus.languages,
            index_built: corpus.index_built,
        }
    }

    pub fn store(&self) -> &Arc<KnowledgeStore> {
        &self.store
    }

    pub fn mode_controller(&self) -> &ModeController {
        &self.mode
    }

    /// Stop background learning and wait for the workers to exit.
    pub async fn shutdown(&self) {
        self.mode.set_mode(false).await;
        info!("engine shut down");
    }
}

fn validate_pair(request: &TeachRequest) -> Result<(), AutodidactError> {
    if request.question.trim().is_empty() || request.answer.trim().is_empty() {
        return Err(AutodidactError::InvalidInput(
            "question and answer must not be blank".into(),
        ));
    }
    Ok(())
}
