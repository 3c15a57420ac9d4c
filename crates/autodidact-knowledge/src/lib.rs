// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge corpus, similarity index, and question resolution.
//!
//! The [`KnowledgeStore`] owns the corpus and its [`SimilarityIndex`]; the
//! [`Resolver`] answers questions against it and, in learning mode, grows it
//! from external providers.

pub mod fallback;
pub mod index;
pub mod language;
pub mod resolver;
pub mod seed;
pub mod store;

pub use index::{MIN_INDEXED_ENTRIES, SimilarityIndex};
pub use language::detect_language;
pub use resolver::{PROVIDER_CONFIDENCE, Resolver};
pub use store::{CorpusStats, KnowledgeStore, UpsertOutcome};
