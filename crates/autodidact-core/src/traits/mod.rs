// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Both traits use `#[async_trait]` so implementations can be held as
//! `Arc<dyn ...>` trait objects.

pub mod backend;
pub mod provider;

pub use backend::CorpusBackend;
pub use provider::KnowledgeProvider;
