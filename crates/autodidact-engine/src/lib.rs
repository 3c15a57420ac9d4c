// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Autodidact engine: a self-expanding question-answering service.
//!
//! [`Engine`] exposes query, teach, override, forget, mode switch and stats
//! operations over typed requests (see [`api`]).

pub mod api;
pub mod engine;
pub mod shutdown;

pub use api::{
    ForgetRequest, ModeRequest, ModeResponse, QueryRequest, QueryResponse, StatsResponse,
    TeachOutcome, TeachRequest,
};
pub use engine::{Engine, EngineParts};
pub use shutdown::install_signal_handler;
