// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade so any installed recorder can collect these.
//! Without a recorder every call is a no-op.

use metrics::describe_counter;

use crate::types::AnswerSource;

/// Register all Autodidact metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        "autodidact_resolutions_total",
        "Queries answered, by resolution stage"
    );
    describe_counter!(
        "autodidact_provider_calls_total",
        "External provider calls, by provider and outcome"
    );
    describe_counter!(
        "autodidact_entries_learned_total",
        "Entries added to the corpus, by origin"
    );
}

/// Record a resolved query.
pub fn record_resolution(source: AnswerSource) {
    metrics::counter!("autodidact_resolutions_total", "source" => source.to_string())
        .increment(1);
}

/// Record a provider call outcome (`success`, `failure`).
pub fn record_provider_call(provider: &str, outcome: &'static str) {
    metrics::counter!(
        "autodidact_provider_calls_total",
        "provider" => provider.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Record a newly learned entry (`teacher`, `fallback`, `user`, `seed`).
pub fn record_learned(origin: &'static str) {
    metrics::counter!("autodidact_entries_learned_total", "origin" => origin).increment(1);
}
