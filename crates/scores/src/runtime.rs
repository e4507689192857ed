//! Score recorder runtime.
//!
//! Bridges the synchronous game loop with an async store: the game-over sink
//! only enqueues a record, and a background task on the recorder's own tokio
//! runtime persists it. Failures are logged and dropped; nothing flows back
//! into the engine.

use std::path::PathBuf;
use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use blockfall_core::GameOverSink;

use crate::error::{Result, ScoreError};
use crate::record::ScoreRecord;
use crate::store::{JsonlScoreStore, ScoreStore};

/// Default location of the scores file.
pub const DEFAULT_SCORES_PATH: &str = "blockfall-scores.jsonl";

/// Recorder settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreConfig {
    pub path: PathBuf,
    pub disabled: bool,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_SCORES_PATH),
            disabled: false,
        }
    }
}

impl ScoreConfig {
    /// Read `BLOCKFALL_SCORES_PATH` and `BLOCKFALL_SCORES_DISABLED`.
    pub fn from_env() -> Self {
        use std::env;

        let path = env::var("BLOCKFALL_SCORES_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORES_PATH));

        let disabled = env::var("BLOCKFALL_SCORES_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self { path, disabled }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Running recorder instance.
///
/// Dropping it aborts pending writes; call [`ScoreRecorder::shutdown`] to
/// flush first.
pub struct ScoreRecorder {
    rt: Runtime,
    tx: mpsc::UnboundedSender<ScoreRecord>,
    task: JoinHandle<()>,
}

impl ScoreRecorder {
    /// Start a recorder that persists into `store`.
    pub fn start<S: ScoreStore>(store: S) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("blockfall-scores")
            .enable_all()
            .build()?;

        let (tx, mut rx) = mpsc::unbounded_channel::<ScoreRecord>();
        let task = rt.spawn(async move {
            while let Some(record) = rx.recv().await {
                match store.append(record.clone()).await {
                    Ok(()) => tracing::info!(
                        player = %record.player,
                        score = record.score,
                        "score recorded"
                    ),
                    Err(e) => tracing::warn!(
                        player = %record.player,
                        score = record.score,
                        error = %e,
                        "failed to record score"
                    ),
                }
            }
        });

        Ok(Self { rt, tx, task })
    }

    /// Start a JSON lines recorder from [`ScoreConfig`].
    ///
    /// Returns `Ok(None)` when recording is disabled.
    pub fn start_with_config(config: &ScoreConfig) -> Result<Option<Self>> {
        if config.disabled {
            tracing::info!("score recording disabled");
            return Ok(None);
        }
        Self::start(JsonlScoreStore::new(config.path.clone())).map(Some)
    }

    /// A game-over sink feeding this recorder.
    pub fn sink(&self) -> ScoreSink {
        ScoreSink {
            tx: self.tx.clone(),
        }
    }

    /// Stop accepting records and wait up to `timeout` for queued writes.
    ///
    /// Sinks handed out by [`ScoreRecorder::sink`] keep the queue open, so
    /// drop them (with their sessions) first.
    pub fn shutdown(self, timeout: Duration) -> Result<()> {
        let ScoreRecorder { rt, tx, task } = self;
        drop(tx);
        match rt.block_on(async { tokio::time::timeout(timeout, task).await }) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "score recorder task failed");
                Err(ScoreError::Task(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(?timeout, "score recorder did not drain before shutdown");
                Err(ScoreError::Timeout(timeout))
            }
        }
    }
}

/// [`GameOverSink`] that forwards final scores to a [`ScoreRecorder`].
#[derive(Debug, Clone)]
pub struct ScoreSink {
    tx: mpsc::UnboundedSender<ScoreRecord>,
}

impl GameOverSink for ScoreSink {
    fn on_game_over(&mut self, final_score: u32, player: &str) {
        if self.tx.send(ScoreRecord::now(player, final_score)).is_err() {
            tracing::warn!(player, final_score, "score recorder closed, dropping score");
        }
    }
}
