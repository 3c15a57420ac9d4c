// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock knowledge provider for deterministic testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use autodidact_core::{AutodidactError, KnowledgeProvider};
use tokio::sync::Mutex;

/// A provider that replays scripted outcomes.
///
/// Scripted outcomes are popped from a FIFO queue. When the queue is empty
/// the provider answers `"<name> answer: <topic>"`, or fails if it was put in
/// failing mode.
pub struct MockProvider {
    name: String,
    script: Mutex<VecDeque<Result<String, String>>>,
    failing: AtomicBool,
    calls: AtomicUsize,
    topics: Mutex<Vec<String>>,
    latency: Duration,
}

impl MockProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            script: Mutex::new(VecDeque::new()),
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            topics: Mutex::new(Vec::new()),
            latency: Duration::ZERO,
        }
    }

    /// A provider pre-loaded with successful answers.
    pub fn with_responses(name: &str, responses: Vec<String>) -> Self {
        Self {
            script: Mutex::new(responses.into_iter().map(Ok).collect()),
            ..Self::new(name)
        }
    }

    /// A provider whose every call fails.
    pub fn failing(name: &str) -> Self {
        let provider = Self::new(name);
        provider.failing.store(true, Ordering::SeqCst);
        provider
    }

    /// Delay every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub async fn push_response(&self, text: &str) {
        self.script.lock().await.push_back(Ok(text.to_string()));
    }

    pub async fn push_failure(&self, message: &str) {
        self.script.lock().await.push_back(Err(message.to_string()));
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of calls started so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Topics asked so far, in call order.
    pub async fn topics(&self) -> Vec<String> {
        self.topics.lock().await.clone()
    }
}

#[async_trait]
impl KnowledgeProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn ask(&self, topic: &str, _instruction: &str) -> Result<String, AutodidactError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.topics.lock().await.push(topic.to_string());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let scripted = self.script.lock().await.pop_front();
        match scripted {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(AutodidactError::provider(&self.name, message)),
            None if self.failing.load(Ordering::SeqCst) => {
                Err(AutodidactError::provider(&self.name, "mock outage"))
            }
            None => Ok(format!("{} answer: {topic}", self.name)),
        }
    }
}
