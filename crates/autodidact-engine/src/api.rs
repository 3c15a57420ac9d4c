// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response types for the engine's operations.
//!
//! All types are serde-serializable so any transport (CLI, HTTP, IPC) can
//! carry them unchanged.

use std::collections::BTreeMap;

use autodidact_core::{Mode, ProviderStats, Resolution};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub question: String,
}

/// `{ answer, confidence, source, found, category, language }`.
pub type QueryResponse = Resolution;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeachOutcome {
    Learned,
    /// The question was already stored; nothing changed.
    Duplicate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgetRequest {
    pub question: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeRequest {
    pub learning_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeResponse {
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub entry_count: usize,
    pub provider_stats: BTreeMap<String, ProviderStats>,
    pub mode: Mode,
    pub categories: BTreeMap<String, usize>,
    pub languages: BTreeMap<String, usize>,
    pub index_built: bool,
}
