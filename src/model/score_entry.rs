use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Verdict;

/// Derived timing aggregate over every entry that recorded a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingStats {
    pub fastest_seconds: u64,
    /// Mean duration, rounded to the nearest whole second.
    pub average_seconds: u64,
}

/// One finished round on the scoreboard. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    pub duration_seconds: Option<u64>,
    /// Range size of the round this entry came from; the verdict is rated
    /// against this, not against whatever difficulty is selected later.
    pub range_max: u32,
    pub recorded_at: i64,
    pub round_id: Uuid,
}

impl ScoreEntry {
    pub fn verdict(&self) -> Verdict {
        Verdict::rate(self.score, self.range_max)
    }
}

/// Render-ready aggregate emitted after every recorded result.
#[derive(Debug, Clone)]
pub struct LeaderboardSnapshot {
    /// Entries sorted ascending by score; insertion order breaks ties.
    pub rows: Vec<ScoreEntry>,
    pub total_wins: usize,
    pub average_score: f64,
    pub latest_verdict: Option<Verdict>,
    pub timing: Option<TimingStats>,
    /// Round id of the most recently recorded entry, for highlighting.
    pub latest_round_id: Option<Uuid>,
}

impl LeaderboardSnapshot {
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total_wins: 0,
            average_score: 0.0,
            latest_verdict: None,
            timing: None,
            latest_round_id: None,
        }
    }
}
