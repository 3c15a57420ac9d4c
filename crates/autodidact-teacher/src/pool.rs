// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background teacher workers, one per external provider.
//!
//! Each worker loops over its topic cursor: skip topics the store already
//! knows, ask its provider about the rest, and store what comes back. Workers
//! share a [`CancellationToken`] and observe it before each cycle, while a
//! provider call is in flight, and while sleeping.

use std::sync::Arc;
use std::time::Duration;

use autodidact_config::model::{TeacherConfig, TopicOrder};
use autodidact_core::metrics::record_learned;
use autodidact_knowledge::{KnowledgeStore, detect_language};
use autodidact_providers::{ProviderSet, ProviderSlot};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::topics::{Topic, TopicCursor};

/// Timing and topic settings shared by every worker.
#[derive(Debug, Clone)]
pub struct TeacherSettings {
    /// Pause after each attempted topic, unless the provider slot overrides it.
    pub interval: Duration,
    /// Pause after a failed provider call.
    pub failure_backoff: Duration,
    /// Pause after skipping a known topic.
    pub skip_delay: Duration,
    pub topic_order: TopicOrder,
    pub instruction: String,
}

impl TeacherSettings {
    pub fn from_config(config: &TeacherConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.interval_secs),
            failure_backoff: Duration::from_secs(config.failure_backoff_secs),
            skip_delay: Duration::from_millis(config.skip_delay_ms),
            topic_order: config.topic_order,
            instruction: config.system_instruction.clone(),
        }
    }
}

struct Running {
    cancel: CancellationToken,
    workers: Vec<JoinHandle<()>>,
}

/// Supervises the teacher workers.
pub struct TeacherPool {
    store: Arc<KnowledgeStore>,
    providers: ProviderSet,
    topics: Arc<Vec<Topic>>,
    settings: TeacherSettings,
    running: Mutex<Option<Running>>,
}

impl TeacherPool {
    pub fn new(
        store: Arc<KnowledgeStore>,
        providers: ProviderSet,
        topics: Vec<Topic>,
        settings: TeacherSettings,
    ) -> Self {
        Self {
            store,
            providers,
            topics: Arc::new(topics),
            settings,
            running: Mutex::new(None),
        }
    }

    /// Spawn one worker per provider. Returns `false` if already running.
    pub async fn start(&self) -> bool {
        let mut running = self.running.lock().await;
        if running.is_some() {
            return false;
        }

        let cancel = CancellationToken::new();
        let workers = self
            .providers
            .slots()
            .iter()
            .enumerate()
            .map(|(id, slot)| {
                let worker = Worker {
                    id,
                    slot: slot.clone(),
                    store: self.store.clone(),
                    cursor: TopicCursor::new(self.topics.clone(), self.settings.topic_order, id),
                    settings: self.settings.clone(),
                    cancel: cancel.child_token(),
                };
                tokio::spawn(worker.run())
            })
            .collect::<Vec<_>>();

        info!(workers = workers.len(), topics = self.topics.len(), "teacher pool started");
        *running = Some(Running { cancel, workers });
        true
    }

    /// Cancel every worker and wait for them to exit. Returns `false` if the
    /// pool was not running.
    pub async fn stop(&self) -> bool {
        let Some(Running { cancel, workers }) = self.running.lock().await.take() else {
            return false;
        };

        cancel.cancel();
        let count = workers.len();
        for handle in workers {
            if let Err(e) = handle.await {
                warn!(error = %e, "teacher worker ended abnormally");
            }
        }
        info!(workers = count, "teacher pool stopped");
        true
    }

    pub async fn is_running(&self) -> bool {
        self.running.lock().await.is_some()
    }

    /// Number of live workers (0 when stopped).
    pub async fn worker_count(&self) -> usize {
        self.running
            .lock()
            .await
            .as_ref()
            .map(|r| r.workers.iter().filter(|h| !h.is_finished()).count())
            .unwrap_or(0)
    }
}

struct Worker {
    id: usize,
    slot: Arc<ProviderSlot>,
    store: Arc<KnowledgeStore>,
    cursor: TopicCursor,
    settings: TeacherSettings,
    cancel: CancellationToken,
}

impl Worker {
    async fn run(mut self) {
        let provider = self.slot.name().to_string();
        let interval = self.slot.interval().unwrap_or(self.settings.interval);
        debug!(worker = self.id, provider = %provider, "teacher worker started");

        loop {
            if self.cancel.is_cancelled() {
                break;
            }
            let Some(topic) = self.cursor.next_topic().cloned() else {
                warn!(worker = self.id, "no teacher topics configured");
                break;
            };

            if self.store.contains(&topic.question).await {
                debug!(worker = self.id, topic = %topic.question, "topic already known, skipping");
                if self.pause(self.settings.skip_delay).await {
                    break;
                }
                continue;
            }

            let outcome = tokio::select! {
                _ = self.cancel.cancelled() => break,
                result = self.slot.ask(&topic.question, &self.settings.instruction) => result,
            };

            let pause = match outcome {
                Ok(answer) => {
                    let language = detect_language(&topic.question);
                    if self
                        .store
                        .add(&topic.question, &answer, &topic.category, language)
                        .await
                    {
                        record_learned("teacher");
                        info!(provider = %provider, topic = %topic.question, category = %topic.category, "learned topic");
                    }
                    interval
                }
                Err(_) => self.settings.failure_backoff,
            };

            if self.pause(pause).await {
                break;
            }
        }

        debug!(worker = self.id, provider = %provider, "teacher worker stopped");
    }

    /// Sleep for `duration`. Returns `true` if cancelled meanwhile.
    async fn pause(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => true,
            _ = tokio::time::sleep(duration) => false,
        }
    }
}
