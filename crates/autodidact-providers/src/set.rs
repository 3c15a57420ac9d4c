// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Priority-ordered provider slots with per-provider health counters.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use autodidact_config::model::ProviderConfig;
use autodidact_core::metrics::record_provider_call;
use autodidact_core::{AutodidactError, KnowledgeProvider, ProviderStats};
use tracing::{debug, info, warn};

use crate::openai::OpenAiCompatibleClient;

/// Default bound on a single provider call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// One provider plus its process-lifetime counters.
///
/// A slot may be used concurrently by the resolver and its teacher worker;
/// `busy` is true while at least one call is in flight.
pub struct ProviderSlot {
    provider: Arc<dyn KnowledgeProvider>,
    success: AtomicU64,
    failure: AtomicU64,
    in_flight: AtomicUsize,
    timeout: Duration,
    interval: Option<Duration>,
}

/// Decrements the in-flight count even if the call future is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ProviderSlot {
    pub fn new(provider: Arc<dyn KnowledgeProvider>, timeout: Duration) -> Self {
        Self {
            provider,
            success: AtomicU64::new(0),
            failure: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            timeout,
            interval: None,
        }
    }

    /// Per-provider teacher interval override.
    pub fn with_interval(mut self, interval: Option<Duration>) -> Self {
        self.interval = interval;
        self
    }

    pub fn name(&self) -> &str {
        self.provider.name()
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Ask the provider, bounded by the slot timeout, and update counters.
    ///
    /// Blank answers count as failures.
    pub async fn ask(&self, topic: &str, instruction: &str) -> Result<String, AutodidactError> {
        let _guard = InFlight::enter(&self.in_flight);

        let result = match tokio::time::timeout(self.timeout, self.provider.ask(topic, instruction))
            .await
        {
            Ok(Ok(text)) if text.trim().is_empty() => Err(AutodidactError::provider(
                self.name(),
                "provider returned an empty answer",
            )),
            Ok(Ok(text)) => Ok(text.trim().to_string()),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(AutodidactError::Timeout {
                duration: self.timeout,
            }),
        };

        match &result {
            Ok(_) => {
                self.success.fetch_add(1, Ordering::Relaxed);
                record_provider_call(self.name(), "success");
                debug!(provider = self.name(), topic, "provider answered");
            }
            Err(e) => {
                self.failure.fetch_add(1, Ordering::Relaxed);
                record_provider_call(self.name(), "failure");
                warn!(provider = self.name(), topic, error = %e, "provider call failed");
            }
        }
        result
    }

    pub fn stats(&self) -> ProviderStats {
        ProviderStats {
            success: self.success.load(Ordering::Relaxed),
            failure: self.failure.load(Ordering::Relaxed),
            busy: self.in_flight.load(Ordering::SeqCst) > 0,
        }
    }
}

/// The configured providers in fixed priority order.
#[derive(Clone, Default)]
pub struct ProviderSet {
    slots: Vec<Arc<ProviderSlot>>,
}

impl ProviderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one OpenAI-compatible client per configured provider.
    pub fn from_config(
        providers: &[ProviderConfig],
        default_interval: Duration,
    ) -> Result<Self, AutodidactError> {
        let mut set = Self::new();
        for config in providers {
            let client = OpenAiCompatibleClient::new(config)?;
            let interval = config
                .interval_secs
                .map(Duration::from_secs)
                .unwrap_or(default_interval);
            let slot = ProviderSlot::new(Arc::new(client), Duration::from_secs(config.timeout_secs))
                .with_interval(Some(interval));
            info!(provider = %config.name, model = %config.model, "provider configured");
            set.push(slot);
        }
        Ok(set)
    }

    /// Append a provider at the lowest priority.
    pub fn push(&mut self, slot: ProviderSlot) {
        self.slots.push(Arc::new(slot));
    }

    /// Builder-style [`push`](Self::push) with the default call timeout.
    pub fn with_provider(mut self, provider: Arc<dyn KnowledgeProvider>) -> Self {
        self.push(ProviderSlot::new(provider, DEFAULT_CALL_TIMEOUT));
        self
    }

    pub fn slots(&self) -> &[Arc<ProviderSlot>] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Try providers in priority order; return the first answer and the
    /// name of the provider that gave it.
    pub async fn ask_first(&self, topic: &str, instruction: &str) -> Option<(String, String)> {
        for slot in &self.slots {
            if let Ok(answer) = slot.ask(topic, instruction).await {
                return Some((slot.name().to_string(), answer));
            }
        }
        None
    }

    /// Snapshot of every provider's counters keyed by name.
    pub fn stats(&self) -> BTreeMap<String, ProviderStats> {
        self.slots
            .iter()
            .map(|slot| (slot.name().to_string(), slot.stats()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    struct Fixed {
        name: &'static str,
        reply: Result<&'static str, ()>,
        calls: AtomicUsize,
        delay: Duration,
    }

    impl Fixed {
        fn ok(name: &'static str, reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                reply: Ok(reply),
                calls: AtomicUsize::new(0),
                delay: Duration::ZERO,
            })
        }

        fn failing(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                reply: Err(()),
                calls: AtomicUsize::new(0),
                delay: Duration::ZERO,
            })
        }
    }

    #[async_trait]
    impl KnowledgeProvider for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        async fn ask(&self, _topic: &str, _instruction: &str) -> Result<String, AutodidactError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.reply
                .map(str::to_string)
                .map_err(|()| AutodidactError::provider(self.name, "down"))
        }
    }

    #[tokio::test]
    async fn first_success_wins_in_priority_order() {
        let primary = Fixed::failing("primary");
        let secondary = Fixed::ok("secondary", "from secondary");
        let tertiary = Fixed::ok("tertiary", "from tertiary");
        let set = ProviderSet::new()
            .with_provider(primary.clone())
            .with_provider(secondary.clone())
            .with_provider(tertiary.clone());

        let (name, answer) = set.ask_first("q", "i").await.unwrap();
        assert_eq!(name, "secondary");
        assert_eq!(answer, "from secondary");
        assert_eq!(tertiary.calls.load(Ordering::SeqCst), 0);

        let stats = set.stats();
        assert_eq!(stats["primary"].failure, 1);
        assert_eq!(stats["secondary"].success, 1);
        assert_eq!(stats["tertiary"], ProviderStats::default());
    }

    #[tokio::test]
    async fn all_failing_returns_none() {
        let set = ProviderSet::new()
            .with_provider(Fixed::failing("a"))
            .with_provider(Fixed::failing("b"));
        assert!(set.ask_first("q", "i").await.is_none());
        assert_eq!(set.stats()["b"].failure, 1);
    }

    #[tokio::test]
    async fn blank_answer_counts_as_failure() {
        let set = ProviderSet::new().with_provider(Fixed::ok("blank", "   "));
        assert!(set.ask_first("q", "i").await.is_none());
        assert_eq!(set.stats()["blank"].failure, 1);
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let slow = Arc::new(Fixed {
            name: "slow",
            reply: Ok("late"),
            calls: AtomicUsize::new(0),
            delay: Duration::from_secs(5),
        });
        let slot = ProviderSlot::new(slow, Duration::from_millis(20));
        let err = slot.ask("q", "i").await.unwrap_err();
        assert!(matches!(err, AutodidactError::Timeout { .. }));
        assert_eq!(slot.stats().failure, 1);
        assert!(!slot.stats().busy);
    }

    #[tokio::test]
    async fn busy_while_call_in_flight() {
        let slow = Arc::new(Fixed {
            name: "slow",
            reply: Ok("done"),
            calls: AtomicUsize::new(0),
            delay: Duration::from_millis(200),
        });
        let slot = Arc::new(ProviderSlot::new(slow, Duration::from_secs(5)));

        let task = {
            let slot = slot.clone();
            tokio::spawn(async move { slot.ask("q", "i").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(slot.stats().busy);

        assert_eq!(task.await.unwrap().unwrap(), "done");
        assert!(!slot.stats().busy);
    }

    #[test]
    fn from_config_keeps_order_and_intervals() {
        let make = |name: &str, interval: Option<u64>| ProviderConfig {
            name: name.into(),
            base_url: "http://localhost:11434/v1".into(),
            model: "llama3".into(),
            api_key: None,
            api_key_env: None,
            timeout_secs: 10,
            max_tokens: 128,
            temperature: 0.5,
            interval_secs: interval,
        };
        let set = ProviderSet::from_config(
            &[make("first", None), make("second", Some(5))],
            Duration::from_secs(30),
        )
        .unwrap();

        let names: Vec<&str> = set.slots().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(set.slots()[0].interval(), Some(Duration::from_secs(30)));
        assert_eq!(set.slots()[1].interval(), Some(Duration::from_secs(5)));
    }
}
