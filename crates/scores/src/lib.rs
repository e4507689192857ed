//! High-score persistence for finished games.
//!
//! The engine never talks to storage. A driver starts a [`ScoreRecorder`]
//! with an explicit store, hands its [`ScoreSink`] to the session, and the
//! session reports the final score once when the game ends.
//!
//! # Configuration
//!
//! - `BLOCKFALL_SCORES_PATH`: JSON lines file (default: `blockfall-scores.jsonl`)
//! - `BLOCKFALL_SCORES_DISABLED`: set to "1" or "true" to skip recording
//!
//! # File format
//!
//! ```text
//! {"player":"ada","score":120,"recorded_at_ms":1700000000000}
//! {"player":"bob","score":40,"recorded_at_ms":1700000050000}
//! ```

pub mod error;
pub mod record;
pub mod runtime;
pub mod store;

pub use error::{Result, ScoreError};
pub use record::ScoreRecord;
pub use runtime::{ScoreConfig, ScoreRecorder, ScoreSink, DEFAULT_SCORES_PATH};
pub use store::{JsonlScoreStore, MemoryScoreStore, ScoreStore};
