// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External knowledge providers for Autodidact.
//!
//! [`OpenAiCompatibleClient`] talks to any chat-completions endpoint (Groq,
//! OpenRouter, Together, Ollama, ...). [`ProviderSet`] wraps each provider in
//! a slot that enforces a timeout and keeps success/failure counters.

pub mod openai;
pub mod set;
pub mod types;

pub use openai::OpenAiCompatibleClient;
pub use set::{ProviderSet, ProviderSlot};
