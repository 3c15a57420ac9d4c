// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Collects every violation instead of failing on the first one.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::{AutodidactConfig, StorageBackendKind};

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &AutodidactConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let threshold = config.index.fuzzy_threshold;
    if !(threshold > 0.0 && threshold <= 1.0) {
        fail(format!(
            "index.fuzzy_threshold must be in (0, 1], got {threshold}"
        ));
    }

    if config.index.max_features == 0 {
        fail("index.max_features must be at least 1".to_string());
    }

    if !(1..=3).contains(&config.index.max_ngram) {
        fail(format!(
            "index.max_ngram must be between 1 and 3, got {}",
            config.index.max_ngram
        ));
    }

    if config.storage.backend != StorageBackendKind::Memory
        && config.storage.path.trim().is_empty()
    {
        fail("storage.path must not be empty".to_string());
    }

    if config.teacher.interval_secs == 0 {
        fail("teacher.interval_secs must be greater than 0".to_string());
    }

    if config.teacher.failure_backoff_secs == 0 {
        fail("teacher.failure_backoff_secs must be greater than 0".to_string());
    }

    if config.teacher.system_instruction.trim().is_empty() {
        fail("teacher.system_instruction must not be empty".to_string());
    }

    for (i, topic) in config.teacher.topics.iter().enumerate() {
        if topic.question.trim().is_empty() {
            fail(format!("teacher.topics[{i}].question must not be empty"));
        }
    }

    let mut seen_names = HashSet::new();
    for (i, provider) in config.providers.iter().enumerate() {
        if provider.name.trim().is_empty() {
            fail(format!("providers[{i}].name must not be empty"));
        } else if !seen_names.insert(provider.name.as_str()) {
            fail(format!(
                "duplicate provider name `{}` in [[providers]] array",
                provider.name
            ));
        }

        if provider.base_url.trim().is_empty() {
            fail(format!("providers[{i}].base_url must not be empty"));
        }

        if provider.model.trim().is_empty() {
            fail(format!("providers[{i}].model must not be empty"));
        }

        if provider.timeout_secs == 0 {
            fail(format!("providers[{i}].timeout_secs must be greater than 0"));
        }

        if provider.interval_secs == Some(0) {
            fail(format!("providers[{i}].interval_secs must be greater than 0"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
