// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the knowledge engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Category assigned to answers fetched on demand from a provider.
pub const CATEGORY_GENERATED: &str = "generated";

/// Category assigned to answers taught or overridden by a user.
pub const CATEGORY_USER_TAUGHT: &str = "user_taught";

/// Category reported for canned replies that match nothing stored.
pub const CATEGORY_UNKNOWN: &str = "unknown";

/// Normalize a question into its storage key: lower-cased and trimmed.
pub fn normalize_question(question: &str) -> String {
    question.trim().to_lowercase()
}

/// Language tag carried by every entry and every answer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    /// English, the primary language.
    #[default]
    En,
    /// Tagalog.
    Tl,
}

/// Which resolution stage produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AnswerSource {
    /// Normalized question matched a stored key verbatim.
    Exact,
    /// Cosine similarity over the threshold.
    Fuzzy,
    /// Fetched from an external knowledge provider during the query.
    Provider,
    /// Canned keyword-based reply; nothing was found.
    Generated,
}

/// Operating mode of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Providers may be consulted and the teacher pool runs.
    Learning,
    /// Local-only answering; the teacher pool is stopped.
    Test,
}

impl Mode {
    /// Map the boolean mode switch onto a mode.
    pub fn from_learning(learning: bool) -> Self {
        if learning { Mode::Learning } else { Mode::Test }
    }

    /// Whether this mode permits provider calls.
    pub fn is_learning(self) -> bool {
        self == Mode::Learning
    }
}

/// A single stored question/answer record.
///
/// This is also the persisted schema for every backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Normalized question; the unique key.
    pub question: String,
    /// Answer text, trimmed.
    pub answer: String,
    /// Free-form category (`greeting`, `lua_basics`, `generated`, ...).
    pub category: String,
    /// Language of the entry.
    pub language: Language,
    /// When the entry was first stored.
    pub created_at: DateTime<Utc>,
}

impl KnowledgeEntry {
    /// Build an entry stamped with the current time.
    ///
    /// The question is normalized and the answer trimmed.
    pub fn new(question: &str, answer: &str, category: &str, language: Language) -> Self {
        Self {
            question: normalize_question(question),
            answer: answer.trim().to_string(),
            category: category.to_string(),
            language,
            created_at: Utc::now(),
        }
    }
}

/// Process-lifetime counters for one external provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStats {
    /// Calls that returned usable text.
    pub success: u64,
    /// Calls that failed or timed out.
    pub failure: u64,
    /// Whether a call is currently in flight.
    pub busy: bool,
}

/// The answer to a query together with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub answer: String,
    /// Retrieval certainty in `[0, 1]`.
    pub confidence: f64,
    pub source: AnswerSource,
    /// `false` only for canned replies.
    pub found: bool,
    pub category: String,
    pub language: Language,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize_question("  What Is LUA \n"), "what is lua");
        assert_eq!(normalize_question("what is a loop?"), "what is a loop?");
    }

    #[test]
    fn language_string_forms() {
        assert_eq!(Language::En.to_string(), "en");
        assert_eq!(Language::Tl.to_string(), "tl");
        assert_eq!(Language::from_str("tl").unwrap(), Language::Tl);
        assert_eq!(serde_json::to_string(&Language::Tl).unwrap(), "\"tl\"");
    }

    #[test]
    fn answer_source_serializes_lowercase() {
        let json = serde_json::to_string(&AnswerSource::Provider).unwrap();
        assert_eq!(json, "\"provider\"");
        assert_eq!(AnswerSource::Generated.to_string(), "generated");
    }

    #[test]
    fn mode_from_learning_flag() {
        assert_eq!(Mode::from_learning(true), Mode::Learning);
        assert_eq!(Mode::from_learning(false), Mode::Test);
        assert!(Mode::Learning.is_learning());
        assert_eq!(Mode::Test.to_string(), "test");
    }

    #[test]
    fn entry_new_normalizes_fields() {
        let entry = KnowledgeEntry::new("  Hello ", " Hi there!  ", "greeting", Language::En);
        assert_eq!(entry.question, "hello");
        assert_eq!(entry.answer, "Hi there!");
        assert_eq!(entry.category, "greeting");
    }

    #[test]
    fn entry_json_schema() {
        let entry = KnowledgeEntry::new("hi", "hey", "greeting", Language::En);
        let value = serde_json::to_value(&entry).unwrap();
        for key in ["question", "answer", "category", "language", "created_at"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        let back: KnowledgeEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
