// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Autodidact knowledge engine.
//!
//! This crate provides the domain types, the error type, and the adapter
//! traits shared by every other crate in the workspace. Storage backends and
//! external knowledge providers implement the traits defined here.

pub mod error;
pub mod metrics;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AutodidactError;
pub use traits::{CorpusBackend, KnowledgeProvider};
pub use types::{
    AnswerSource, KnowledgeEntry, Language, Mode, ProviderStats, Resolution, normalize_question,
};
