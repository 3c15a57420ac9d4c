// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Autodidact - a self-expanding question-answering store.
//!
//! Every command prints its result as JSON on stdout; logs go to stderr.

use std::path::PathBuf;
use std::time::Duration;

use autodidact_config::model::AutodidactConfig;
use autodidact_core::AutodidactError;
use autodidact_engine::{
    Engine, ForgetRequest, ModeRequest, QueryRequest, TeachRequest, install_signal_handler,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};

/// Autodidact - answers questions and learns what it does not know.
#[derive(Parser, Debug)]
#[command(name = "autodidact", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a question.
    Ask {
        question: String,
        /// Allow external providers to answer unknown questions.
        #[arg(long)]
        learning: bool,
    },
    /// Teach an answer. Existing answers are kept.
    Teach { question: String, answer: String },
    /// Teach an answer, replacing any existing one.
    Override { question: String, answer: String },
    /// Remove a stored question.
    Forget { question: String },
    /// Print corpus and provider statistics.
    Stats,
    /// Run the background teacher until interrupted.
    Learn {
        /// Stop after this many seconds.
        #[arg(long)]
        duration_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => autodidact_config::load_and_validate_path(path),
        None => autodidact_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            autodidact_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.engine.log_level);

    if let Err(e) = run(cli.command, &config).await {
        error!(error = %e, "command failed");
        eprintln!("autodidact: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &AutodidactConfig) -> Result<(), AutodidactError> {
    let engine = Engine::from_config(config).await?;

    let result = match command {
        Commands::Ask { question, learning } => {
            let request = QueryRequest { question };
            let response = if learning {
                engine.query_with_providers(request).await
            } else {
                engine.query(request).await
            };
            response.and_then(|response| print_json(&response))
        }
        Commands::Teach { question, answer } => engine
            .teach(TeachRequest { question, answer })
            .await
            .and_then(|outcome| print_json(&serde_json::json!({ "outcome": outcome }))),
        Commands::Override { question, answer } => engine
            .override_answer(TeachRequest { question, answer })
            .await
            .and_then(|outcome| print_json(&serde_json::json!({ "outcome": outcome }))),
        Commands::Forget { question } => {
            let removed = engine.forget(ForgetRequest { question }).await;
            print_json(&serde_json::json!({ "removed": removed }))
        }
        Commands::Stats => print_json(&engine.stats().await),
        Commands::Learn { duration_secs } => {
            learn(&engine, duration_secs.map(Duration::from_secs)).await;
            print_json(&engine.stats().await)
        }
    };

    engine.shutdown().await;
    result
}

/// Run in learning mode until a signal arrives or `duration` elapses.
async fn learn(engine: &Engine, duration: Option<Duration>) {
    let cancel = install_signal_handler();
    let mode = engine
        .set_mode(ModeRequest {
            learning_enabled: true,
        })
        .await;
    info!(mode = %mode.mode, "learning; press Ctrl+C to stop");

    match duration {
        Some(duration) => {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(duration) => {
                    info!(secs = duration.as_secs(), "learning duration elapsed");
                }
            }
        }
        None => cancel.cancelled().await,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AutodidactError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AutodidactError::Internal(format!("failed to encode output: {e}")))?;
    println!("{text}");
    Ok(())
}

/// Initialize the tracing subscriber with the configured log level.
///
/// `RUST_LOG` takes precedence when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("autodidact={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_ask_with_learning_flag() {
        let cli = Cli::try_parse_from(["autodidact", "ask", "what is lua", "--learning"]).unwrap();
        match cli.command {
            Commands::Ask { question, learning } => {
                assert_eq!(question, "what is lua");
                assert!(learning);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_learn_duration_and_global_config() {
        let cli = Cli::try_parse_from([
            "autodidact",
            "learn",
            "--duration-secs",
            "60",
            "--config",
            "/tmp/autodidact.toml",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Learn {
                duration_secs: Some(60)
            }
        ));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/autodidact.toml")));
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config =
            autodidact_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.engine.name, "autodidact");
    }
}
