// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Autodidact knowledge engine.

use thiserror::Error;

/// The primary error type used across adapter traits and engine operations.
#[derive(Debug, Error)]
pub enum AutodidactError {
    /// Configuration errors (invalid values, unusable provider settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// Durable storage errors (database, file system, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// External knowledge provider errors (HTTP failure, quota, malformed body).
    #[error("provider `{provider}` error: {message}")]
    Provider {
        provider: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Caller supplied an unusable value (empty question, empty answer).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AutodidactError {
    /// Wrap any error as a storage failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        AutodidactError::Storage {
            source: Box::new(err),
        }
    }

    /// Build a provider failure without an underlying source.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        AutodidactError::Provider {
            provider: provider.into(),
            message: message.into(),
            source: None,
        }
    }
}
