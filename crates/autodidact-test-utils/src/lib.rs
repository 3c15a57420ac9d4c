// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Autodidact integration tests.
//!
//! # Components
//!
//! - [`MockProvider`] - scripted provider with failure injection, call counting and latency
//! - [`FailingBackend`] - corpus backend that always fails
//! - [`TestHarness`] - engine over mock providers and an in-memory backend

pub mod failing_backend;
pub mod harness;
pub mod mock_provider;

pub use failing_backend::FailingBackend;
pub use harness::{TestHarness, TestHarnessBuilder, entry};
pub use mock_provider::MockProvider;
