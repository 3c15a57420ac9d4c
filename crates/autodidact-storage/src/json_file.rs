// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON document corpus backend.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use autodidact_core::{AutodidactError, CorpusBackend, KnowledgeEntry};
use tracing::debug;

/// Corpus stored as a pretty-printed JSON array of entries.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so readers never observe a partially written document.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "knowledge.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CorpusBackend for JsonFileBackend {
    fn name(&self) -> &str {
        "json"
    }

    async fn load(&self) -> Result<Vec<KnowledgeEntry>, AutodidactError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AutodidactError::storage(e)),
        };
        serde_json::from_slice(&bytes).map_err(AutodidactError::storage)
    }

    async fn persist(&self, entries: &[KnowledgeEntry]) -> Result<(), AutodidactError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(AutodidactError::storage)?;
            }
        }

        let body = serde_json::to_vec_pretty(entries).map_err(AutodidactError::storage)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, &body)
            .await
            .map_err(AutodidactError::storage)?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(AutodidactError::storage)?;

        debug!(path = %self.path.display(), count = entries.len(), "corpus written to json");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_is_sibling() {
        let backend = JsonFileBackend::new("/var/lib/autodidact/knowledge.json");
        assert_eq!(
            backend.temp_path(),
            PathBuf::from("/var/lib/autodidact/knowledge.json.tmp")
        );
    }
}
