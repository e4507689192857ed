//! Score stores: where finished games end up.
//!
//! The recorder owns a store and calls it from its background task, so
//! every store future must be `Send`.

use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::record::{rank, ScoreRecord};

/// Persistence backend for high scores.
pub trait ScoreStore: Send + Sync + 'static {
    /// Persist one record.
    fn append(&self, record: ScoreRecord) -> impl Future<Output = Result<()>> + Send;

    /// Up to `limit` records, best first.
    fn top(&self, limit: usize) -> impl Future<Output = Result<Vec<ScoreRecord>>> + Send;
}

/// Append-only JSON lines file, one record per line.
#[derive(Debug, Clone)]
pub struct JsonlScoreStore {
    path: PathBuf,
}

impl JsonlScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// [`ScoreStore::top`] for callers outside any tokio runtime.
    pub fn top_blocking(&self, limit: usize) -> Result<Vec<ScoreRecord>> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        rt.block_on(self.top(limit))
    }
}

impl ScoreStore for JsonlScoreStore {
    async fn append(&self, record: ScoreRecord) -> Result<()> {
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }

    async fn top(&self, limit: usize) -> Result<Vec<ScoreRecord>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ScoreRecord>(line) {
                Ok(rec) => records.push(rec),
                Err(e) => tracing::warn!(
                    path = %self.path.display(),
                    line = lineno + 1,
                    error = %e,
                    "skipping malformed score line"
                ),
            }
        }

        rank(&mut records);
        records.truncate(limit);
        Ok(records)
    }
}

/// In-process store; clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    records: Arc<Mutex<Vec<ScoreRecord>>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything appended so far, in arrival order.
    pub fn records(&self) -> Vec<ScoreRecord> {
        self.records
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }
}

impl ScoreStore for MemoryScoreStore {
    async fn append(&self, record: ScoreRecord) -> Result<()> {
        if let Ok(mut v) = self.records.lock() {
            v.push(record);
        }
        Ok(())
    }

    async fn top(&self, limit: usize) -> Result<Vec<ScoreRecord>> {
        let mut records = self.records();
        rank(&mut records);
        records.truncate(limit);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_ranks_and_limits() {
        let store = MemoryScoreStore::new();
        tokio_test::block_on(async {
            store.append(ScoreRecord::new("a", 10, 1)).await.unwrap();
            store.append(ScoreRecord::new("b", 50, 2)).await.unwrap();
            store.append(ScoreRecord::new("c", 20, 3)).await.unwrap();
        });

        let top = tokio_test::block_on(store.top(2)).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].player, "b");
        assert_eq!(top[1].player, "c");
        assert_eq!(store.records().len(), 3);
    }

    #[tokio::test]
    async fn jsonl_missing_file_is_empty() {
        let path = std::env::temp_dir().join(format!(
            "blockfall-missing-{}.jsonl",
            std::process::id()
        ));
        let _ = tokio::fs::remove_file(&path).await;
        let store = JsonlScoreStore::new(&path);
        assert!(store.top(10).await.unwrap().is_empty());
    }
}
