use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// One finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player: String,
    pub score: u32,
    /// Milliseconds since the Unix epoch.
    pub recorded_at_ms: u64,
}

impl ScoreRecord {
    pub fn new(player: impl Into<String>, score: u32, recorded_at_ms: u64) -> Self {
        Self {
            player: player.into(),
            score,
            recorded_at_ms,
        }
    }

    /// Stamp a record with the current wall-clock time.
    pub fn now(player: impl Into<String>, score: u32) -> Self {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self::new(player, score, ms)
    }
}

/// Highest score first; ties go to the earlier record.
pub(crate) fn rank(records: &mut [ScoreRecord]) {
    records.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.recorded_at_ms.cmp(&b.recorded_at_ms))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_json_shape() {
        let rec = ScoreRecord::new("ada", 40, 1_700_000_000_000);
        let v: serde_json::Value = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["player"], "ada");
        assert_eq!(v["score"], 40);
        assert_eq!(v["recorded_at_ms"], 1_700_000_000_000u64);
    }

    #[test]
    fn rank_orders_by_score_then_age() {
        let mut v = vec![
            ScoreRecord::new("a", 10, 3),
            ScoreRecord::new("b", 30, 2),
            ScoreRecord::new("c", 10, 1),
        ];
        rank(&mut v);
        let names: Vec<_> = v.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn now_is_after_2020() {
        assert!(ScoreRecord::now("x", 0).recorded_at_ms > 1_577_836_800_000);
    }
}
