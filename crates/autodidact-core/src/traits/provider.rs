// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External knowledge provider trait.

use async_trait::async_trait;

use crate::error::AutodidactError;

/// An external source of answers (an LLM chat endpoint, a search API, ...).
///
/// Every failure (timeout, quota, malformed response) is reported as an
/// error and treated by callers as recoverable.
#[async_trait]
pub trait KnowledgeProvider: Send + Sync + 'static {
    /// Stable name used in stats and logs.
    fn name(&self) -> &str;

    /// Ask the provider about `topic` under a fixed system instruction and
    /// return its free-text answer.
    async fn ask(&self, topic: &str, instruction: &str) -> Result<String, AutodidactError>;
}
