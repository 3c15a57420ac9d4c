// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end engine tests through the test harness.

use std::sync::Arc;
use std::time::Duration;

use autodidact_config::load_and_validate_str;
use autodidact_core::{AnswerSource, AutodidactError, Mode};
use autodidact_engine::{
    Engine, ForgetRequest, ModeRequest, QueryRequest, TeachOutcome, TeachRequest,
};
use autodidact_knowledge::UpsertOutcome;
use autodidact_teacher::Topic;
use autodidact_test_utils::{MockProvider, TestHarness, entry};

fn teach(question: &str, answer: &str) -> TeachRequest {
    TeachRequest {
        question: question.into(),
        answer: answer.into(),
    }
}

fn small_corpus() -> Vec<autodidact_core::KnowledgeEntry> {
    vec![
        entry("what is a loop", "A loop repeats code."),
        entry("hi", "Hey!"),
        entry("what is lua", "A scripting language."),
    ]
}

#[tokio::test]
async fn blank_question_is_rejected() {
    let harness = TestHarness::builder().build().await;
    let err = harness.ask("   ").await.unwrap_err();
    assert!(matches!(err, AutodidactError::InvalidInput(_)));
}

#[tokio::test]
async fn seeded_engine_answers_greeting_exactly() {
    let harness = TestHarness::builder().build().await;
    let response = harness.ask("Hello").await.unwrap();
    assert_eq!(response.source, AnswerSource::Exact);
    assert_eq!(response.answer, "Hello! Ready to learn Roblox scripting?");
}

#[tokio::test]
async fn teach_then_query_then_duplicate() {
    let harness = TestHarness::builder().with_entries(small_corpus()).build().await;

    let outcome = harness
        .engine
        .teach(teach("What is a RemoteFunction", "Two-way client/server call."))
        .await
        .unwrap();
    assert_eq!(outcome, TeachOutcome::Learned);

    let response = harness.ask("what is a remotefunction").await.unwrap();
    assert_eq!(response.confidence, 1.0);
    assert_eq!(response.category, "user_taught");

    let outcome = harness
        .engine
        .teach(teach("what is a remotefunction", "Something else."))
        .await
        .unwrap();
    assert_eq!(outcome, TeachOutcome::Duplicate);
    assert_eq!(
        harness.ask("what is a remotefunction").await.unwrap().answer,
        "Two-way client/server call."
    );

    let persisted = harness.backend.snapshot().await;
    assert!(persisted.iter().any(|e| e.question == "what is a remotefunction"));
}

#[tokio::test]
async fn teach_rejects_blank_answer() {
    let harness = TestHarness::builder().with_entries(small_corpus()).build().await;
    let err = harness.engine.teach(teach("q", "  ")).await.unwrap_err();
    assert!(matches!(err, AutodidactError::InvalidInput(_)));
}

#[tokio::test]
async fn override_replaces_and_forget_removes() {
    let harness = TestHarness::builder().with_entries(small_corpus()).build().await;

    let outcome = harness
        .engine
        .override_answer(teach("what is a loop", "Code that runs repeatedly."))
        .await
        .unwrap();
    assert_eq!(outcome, UpsertOutcome::Replaced);
    assert_eq!(
        harness.ask("what is a loop").await.unwrap().answer,
        "Code that runs repeatedly."
    );

    assert!(
        harness
            .engine
            .forget(ForgetRequest {
                question: "What is a loop".into()
            })
            .await
    );
    assert!(
        !harness
            .engine
            .forget(ForgetRequest {
                question: "what is a loop".into()
            })
            .await
    );
    assert_ne!(
        harness.ask("what is a loop").await.unwrap().source,
        AnswerSource::Exact
    );
}

#[tokio::test]
async fn test_mode_unknown_query_makes_no_provider_calls() {
    let provider = Arc::new(MockProvider::new("groq"));
    let harness = TestHarness::builder()
        .with_entries(small_corpus())
        .with_provider(provider.clone())
        .build()
        .await;

    let response = harness.ask("how does pathfinding work").await.unwrap();
    assert!(!response.found);
    assert_eq!(response.source, AnswerSource::Generated);
    assert_eq!(harness.total_provider_calls(), 0);
}

#[tokio::test]
async fn learning_mode_fallback_learns_and_counts() {
    let provider = Arc::new(MockProvider::with_responses(
        "groq",
        vec!["Use PathfindingService:CreatePath().".into()],
    ));
    let harness = TestHarness::builder()
        .with_entries(small_corpus())
        .with_provider(provider.clone())
        .build()
        .await;
    // Switch on after building so no teacher topics interfere.
    let mode = harness
        .engine
        .set_mode(ModeRequest {
            learning_enabled: true,
        })
        .await;
    assert_eq!(mode.mode, Mode::Learning);

    let response = harness.ask("how does pathfinding work").await.unwrap();
    assert_eq!(response.source, AnswerSource::Provider);
    assert_eq!(response.answer, "Use PathfindingService:CreatePath().");

    let stats = harness.engine.stats().await;
    assert_eq!(stats.entry_count, 4);
    assert_eq!(stats.mode, Mode::Learning);
    assert_eq!(stats.provider_stats["groq"].success, 1);
    assert_eq!(stats.categories["generated"], 1);

    harness.engine.shutdown().await;
    assert_eq!(harness.engine.stats().await.mode, Mode::Test);
}

#[tokio::test]
async fn single_query_fallback_leaves_teacher_stopped() {
    let provider = Arc::new(MockProvider::with_responses(
        "groq",
        vec!["Use PathfindingService:CreatePath().".into()],
    ));
    let harness = TestHarness::builder()
        .with_entries(small_corpus())
        .with_provider(provider.clone())
        .build()
        .await;

    let response = harness
        .engine
        .query_with_providers(QueryRequest {
            question: "how does pathfinding work".into(),
        })
        .await
        .unwrap();
    assert_eq!(response.source, AnswerSource::Provider);
    assert_eq!(provider.call_count(), 1);

    let controller = harness.engine.mode_controller();
    assert_eq!(controller.mode(), Mode::Test);
    assert!(!controller.pool().is_running().await);

    // back to local-only answering for the next plain query
    let response = harness.ask("tell me about humanoids").await.unwrap();
    assert_eq!(response.source, AnswerSource::Generated);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn background_teacher_grows_corpus_until_shutdown() {
    let provider = Arc::new(MockProvider::new("teacher"));
    let harness = TestHarness::builder()
        .with_entries(small_corpus())
        .with_provider(provider.clone())
        .with_topics(vec![
            Topic::new("what is a bindableevent", "roblox_scripting"),
            Topic::new("what is a screengui", "gui"),
        ])
        .learning(true)
        .build()
        .await;

    let store = harness.engine.store().clone();
    let learned = harness
        .wait_until(Duration::from_secs(3), || {
            let store = store.clone();
            async move { store.count().await == 5 }
        })
        .await;
    assert!(learned);

    harness.engine.shutdown().await;
    assert_eq!(
        harness
            .engine
            .mode_controller()
            .pool()
            .worker_count()
            .await,
        0
    );

    let response = harness.ask("what is a screengui").await.unwrap();
    assert_eq!(response.source, AnswerSource::Exact);
    assert_eq!(response.category, "gui");
}

#[tokio::test]
async fn stats_report_languages_and_index() {
    let harness = TestHarness::builder().build().await;
    let stats = harness.engine.stats().await;
    assert_eq!(stats.entry_count, 26);
    assert_eq!(stats.languages["tl"], 5);
    assert!(stats.index_built);
    assert!(stats.provider_stats.is_empty());
    assert_eq!(stats.mode, Mode::Test);
}

#[tokio::test]
async fn from_config_honors_startup_mode() {
    let config = load_and_validate_str(
        r#"
[engine]
start_in_learning_mode = true

[storage]
backend = "memory"
"#,
    )
    .unwrap();

    let engine = Engine::from_config(&config).await.unwrap();
    assert_eq!(engine.stats().await.mode, Mode::Learning);

    let response = engine
        .query(QueryRequest {
            question: "thanks".into(),
        })
        .await
        .unwrap();
    assert_eq!(response.answer, "You're welcome! Happy to help!");
    engine.shutdown().await;
}

#[tokio::test]
async fn sqlite_corpus_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("knowledge.db");
    let toml = format!(
        "[storage]\nbackend = \"sqlite\"\npath = \"{}\"\n",
        path.display()
    );
    let config = load_and_validate_str(&toml).unwrap();

    {
        let engine = Engine::from_config(&config).await.unwrap();
        engine
            .teach(teach("what is a proximityprompt", "An interaction prompt."))
            .await
            .unwrap();
    }

    let engine = Engine::from_config(&config).await.unwrap();
    let response = engine
        .query(QueryRequest {
            question: "What is a ProximityPrompt".into(),
        })
        .await
        .unwrap();
    assert_eq!(response.source, AnswerSource::Exact);
    assert_eq!(engine.stats().await.entry_count, 27);
}
