// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Autodidact configuration system.

use autodidact_config::diagnostic::ConfigError;
use autodidact_config::model::{StorageBackendKind, TopicOrder};
use autodidact_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with every section deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[engine]
name = "lua-tutor"
log_level = "debug"
start_in_learning_mode = true

[storage]
backend = "json"
path = "/tmp/knowledge.json"

[index]
fuzzy_threshold = 0.4
max_features = 500
max_ngram = 2

[teacher]
interval_secs = 10
failure_backoff_secs = 60
skip_delay_ms = 100
topic_order = "sequential"
topics = [
    { question = "what is a metatable", category = "lua_advanced" },
    { question = "how to use tweenservice" },
]

[[providers]]
name = "groq"
base_url = "https://api.groq.com/openai/v1"
model = "llama-3.1-8b-instant"
api_key_env = "GROQ_API_KEY"

[[providers]]
name = "local"
base_url = "http://localhost:11434/v1"
model = "llama3"
timeout_secs = 90
interval_secs = 5
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.engine.name, "lua-tutor");
    assert!(config.engine.start_in_learning_mode);
    assert_eq!(config.storage.backend, StorageBackendKind::Json);
    assert_eq!(config.storage.path, "/tmp/knowledge.json");
    assert!((config.index.fuzzy_threshold - 0.4).abs() < f64::EPSILON);
    assert_eq!(config.index.max_features, 500);
    assert_eq!(config.teacher.topic_order, TopicOrder::Sequential);
    assert_eq!(config.teacher.topics.len(), 2);
    assert_eq!(config.teacher.topics[1].category, "general");
    assert_eq!(config.providers.len(), 2);
    assert_eq!(config.providers[0].name, "groq");
    assert_eq!(config.providers[0].timeout_secs, 30);
    assert_eq!(config.providers[1].interval_secs, Some(5));
}

/// An empty document yields the compiled defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_and_validate_str("").expect("defaults should validate");
    assert_eq!(config.engine.name, "autodidact");
    assert_eq!(config.teacher.interval_secs, 30);
    assert!(config.providers.is_empty());
}

/// A misspelled key is rejected with a suggestion.
#[test]
fn unknown_key_produces_suggestion() {
    let toml = r#"
[index]
fuzzy_treshold = 0.5
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "fuzzy_treshold");
            assert_eq!(suggestion.as_deref(), Some("fuzzy_threshold"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// A provider without a model is a missing key.
#[test]
fn provider_missing_model_is_reported() {
    let toml = r#"
[[providers]]
name = "groq"
base_url = "https://api.groq.com/openai/v1"
"#;

    let errors = load_and_validate_str(toml).expect_err("model is required");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingKey { key } if key == "model")),
        "got: {errors:?}"
    );
}

/// Wrong value types are reported as InvalidType.
#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[teacher]
interval_secs = "soon"
"#;

    let errors = load_and_validate_str(toml).expect_err("string is not a number");
    assert!(matches!(errors[0], ConfigError::InvalidType { .. }), "got: {errors:?}");
}

/// Semantic validation runs after successful deserialization.
#[test]
fn semantic_validation_runs_after_parse() {
    let toml = r#"
[index]
fuzzy_threshold = 2.0
"#;

    let errors = load_and_validate_str(toml).expect_err("threshold above 1 is invalid");
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}
