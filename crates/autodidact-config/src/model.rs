// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so misspelled keys are
//! rejected at startup instead of silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AutodidactConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub teacher: TeacherConfig,

    /// External knowledge providers, in fallback priority order.
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

/// Engine identity and startup behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default = "default_engine_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Start in learning mode (teacher pool running, provider fallback on).
    #[serde(default)]
    pub start_in_learning_mode: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: default_engine_name(),
            log_level: default_log_level(),
            start_in_learning_mode: false,
        }
    }
}

fn default_engine_name() -> String {
    "autodidact".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which durable backend holds the corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    #[default]
    Sqlite,
    Json,
    /// No durability; the corpus lives only for the process lifetime.
    Memory,
}

/// Corpus storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackendKind,

    /// Database file (sqlite) or document file (json).
    #[serde(default = "default_storage_path")]
    pub path: String,

    /// Enable WAL journal mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::default(),
            path: default_storage_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_storage_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("autodidact").join("knowledge.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("knowledge.db"))
        .display()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Similarity index and fuzzy matching configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Fuzzy matches must score strictly above this cosine similarity.
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,

    /// Vocabulary cap: keep only the most frequent terms.
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Longest word n-gram in the vocabulary (1..=3).
    #[serde(default = "default_max_ngram")]
    pub max_ngram: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: default_fuzzy_threshold(),
            max_features: default_max_features(),
            max_ngram: default_max_ngram(),
        }
    }
}

fn default_fuzzy_threshold() -> f64 {
    0.5
}

fn default_max_features() -> usize {
    1000
}

fn default_max_ngram() -> usize {
    3
}

/// Order in which teacher workers walk the topic list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicOrder {
    Sequential,
    /// Reshuffled at the start of every pass.
    #[default]
    Shuffled,
}

/// Background teacher worker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TeacherConfig {
    /// Pause between teacher cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Pause after a failed provider call.
    #[serde(default = "default_failure_backoff_secs")]
    pub failure_backoff_secs: u64,

    /// Pause after picking a topic that is already known.
    #[serde(default = "default_skip_delay_ms")]
    pub skip_delay_ms: u64,

    #[serde(default)]
    pub topic_order: TopicOrder,

    /// Replaces the built-in topic list when non-empty.
    #[serde(default)]
    pub topics: Vec<TopicConfig>,

    /// Instruction sent with every provider request.
    #[serde(default = "default_system_instruction")]
    pub system_instruction: String,
}

impl Default for TeacherConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            failure_backoff_secs: default_failure_backoff_secs(),
            skip_delay_ms: default_skip_delay_ms(),
            topic_order: TopicOrder::default(),
            topics: Vec::new(),
            system_instruction: default_system_instruction(),
        }
    }
}

fn default_interval_secs() -> u64 {
    30
}

fn default_failure_backoff_secs() -> u64 {
    120
}

fn default_skip_delay_ms() -> u64 {
    500
}

fn default_system_instruction() -> String {
    "You are an expert Roblox Lua scripting tutor. Answer the question directly and \
     concisely, with a short code example when it helps. Do not ask follow-up questions."
        .to_string()
}

/// A teacher topic and the category its answer is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TopicConfig {
    pub question: String,
    #[serde(default = "default_topic_category")]
    pub category: String,
}

fn default_topic_category() -> String {
    "general".to_string()
}

/// One OpenAI-compatible chat-completions provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Unique provider name (used in stats).
    pub name: String,

    /// API base URL, e.g. `https://api.groq.com/openai/v1`.
    pub base_url: String,

    pub model: String,

    /// Inline API key. Takes precedence over `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Environment variable holding the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// Upper bound on a single request.
    #[serde(default = "default_provider_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_provider_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_provider_temperature")]
    pub temperature: f32,

    /// Per-provider teacher interval; falls back to `teacher.interval_secs`.
    #[serde(default)]
    pub interval_secs: Option<u64>,
}

impl ProviderConfig {
    /// Resolve the API key: inline value first, then the named env var.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| {
                self.api_key_env
                    .as_deref()
                    .and_then(|var| std::env::var(var).ok())
                    .filter(|k| !k.is_empty())
            })
    }
}

fn default_provider_timeout_secs() -> u64 {
    30
}

fn default_provider_max_tokens() -> u32 {
    1024
}

fn default_provider_temperature() -> f32 {
    0.7
}
