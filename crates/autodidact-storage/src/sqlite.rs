// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite corpus backend.
//!
//! All access goes through tokio-rusqlite's single background thread. The
//! whole corpus is rewritten inside one transaction on every persist, so a
//! crash leaves either the previous or the new corpus on disk.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use autodidact_core::{AutodidactError, CorpusBackend, KnowledgeEntry, Language};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use tokio_rusqlite::Connection;
use tracing::debug;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS knowledge (
    question   TEXT PRIMARY KEY NOT NULL,
    answer     TEXT NOT NULL,
    category   TEXT NOT NULL,
    language   TEXT NOT NULL,
    created_at TEXT NOT NULL,
    position   INTEGER NOT NULL
)";

/// Helper to convert tokio_rusqlite errors into AutodidactError::Storage.
fn storage_err(e: tokio_rusqlite::Error) -> AutodidactError {
    AutodidactError::Storage {
        source: Box::new(e),
    }
}

/// Corpus stored as one row per entry in a `knowledge` table.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, AutodidactError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(AutodidactError::storage)?;
            }
        }

        let conn = Connection::open(path)
            .await
            .map_err(AutodidactError::storage)?;
        conn.call(move |conn| {
            if wal_mode {
                conn.pragma_update(None, "journal_mode", "WAL")?;
            }
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
        .map_err(storage_err)?;

        debug!(path, wal_mode, "sqlite corpus opened");
        Ok(Self { conn })
    }

    /// Wrap an existing connection, creating the schema if needed.
    pub async fn from_connection(conn: Connection) -> Result<Self, AutodidactError> {
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
        .map_err(storage_err)?;
        Ok(Self { conn })
    }
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> Result<KnowledgeEntry, rusqlite::Error> {
    let language: String = row.get(3)?;
    let created_at: String = row.get(4)?;

    let language = Language::from_str(&language)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(KnowledgeEntry {
        question: row.get(0)?,
        answer: row.get(1)?,
        category: row.get(2)?,
        language,
        created_at,
    })
}

#[async_trait]
impl CorpusBackend for SqliteBackend {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn load(&self) -> Result<Vec<KnowledgeEntry>, AutodidactError> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT question, answer, category, language, created_at
                     FROM knowledge ORDER BY position ASC",
                )?;
                let entries = stmt
                    .query_map([], row_to_entry)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(entries)
            })
            .await
            .map_err(storage_err)
    }

    async fn persist(&self, entries: &[KnowledgeEntry]) -> Result<(), AutodidactError> {
        let entries = entries.to_vec();
        let count = entries.len();
        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute("DELETE FROM knowledge", [])?;
                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO knowledge (question, answer, category, language, created_at, position)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    )?;
                    for (position, entry) in entries.iter().enumerate() {
                        stmt.execute(rusqlite::params![
                            entry.question,
                            entry.answer,
                            entry.category,
                            entry.language.to_string(),
                            entry.created_at.to_rfc3339(),
                            position as i64,
                        ])?;
                    }
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(storage_err)?;

        debug!(count, "corpus written to sqlite");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn in_memory() -> SqliteBackend {
        let conn = Connection::open_in_memory().await.unwrap();
        SqliteBackend::from_connection(conn).await.unwrap()
    }

    #[tokio::test]
    async fn empty_database_loads_nothing() {
        let backend = in_memory().await;
        assert!(backend.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn persist_preserves_order_and_fields() {
        let backend = in_memory().await;
        let entries = vec![
            KnowledgeEntry::new("zeta", "last letter", "general", Language::En),
            KnowledgeEntry::new("kamusta", "Mabuti naman!", "greeting", Language::Tl),
            KnowledgeEntry::new("alpha", "first letter", "general", Language::En),
        ];
        backend.persist(&entries).await.unwrap();

        let loaded = backend.load().await.unwrap();
        let questions: Vec<&str> = loaded.iter().map(|e| e.question.as_str()).collect();
        assert_eq!(questions, vec!["zeta", "kamusta", "alpha"]);
        assert_eq!(loaded[1].language, Language::Tl);
        assert_eq!(loaded[1].answer, "Mabuti naman!");
        assert_eq!(
            loaded[0].created_at.timestamp_millis(),
            entries[0].created_at.timestamp_millis()
        );
    }

    #[tokio::test]
    async fn persist_replaces_previous_corpus() {
        let backend = in_memory().await;
        backend
            .persist(&[
                KnowledgeEntry::new("a", "1", "general", Language::En),
                KnowledgeEntry::new("b", "2", "general", Language::En),
            ])
            .await
            .unwrap();
        backend
            .persist(&[KnowledgeEntry::new("b", "2", "general", Language::En)])
            .await
            .unwrap();

        let loaded = backend.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].question, "b");
    }
}
