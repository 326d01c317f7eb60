use itertools::Itertools;
use log::debug;

use crate::model::{LeaderboardSnapshot, ScoreEntry, TimingStats};

/// In-memory scoreboard for the current session. The entry list only ever
/// grows, in insertion order; ranking by score is a derived view.
#[derive(Debug, Default)]
pub struct Scoreboard {
    entries: Vec<ScoreEntry>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in the order they were recorded.
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn record(&mut self, entry: ScoreEntry) -> LeaderboardSnapshot {
        debug!(target: "scoreboard", "Recording entry: {:?}", entry);
        self.entries.push(entry);
        self.snapshot()
    }

    pub fn snapshot(&self) -> LeaderboardSnapshot {
        if self.entries.is_empty() {
            return LeaderboardSnapshot::empty();
        }

        let rows = self
            .entries
            .iter()
            .cloned()
            .sorted_by_key(|entry| entry.score)
            .collect_vec();

        let total_wins = self.entries.len();
        let score_sum: f64 = self.entries.iter().map(|entry| f64::from(entry.score)).sum();
        let latest = self.entries.last();

        LeaderboardSnapshot {
            rows,
            total_wins,
            average_score: score_sum / total_wins as f64,
            latest_verdict: latest.map(ScoreEntry::verdict),
            timing: self.timing_stats(),
            latest_round_id: latest.map(|entry| entry.round_id),
        }
    }

    fn timing_stats(&self) -> Option<TimingStats> {
        let durations = self
            .entries
            .iter()
            .filter_map(|entry| entry.duration_seconds)
            .collect_vec();
        let fastest_seconds = durations.iter().copied().min()?;
        let sum: u64 = durations.iter().sum();
        let average_seconds = (sum as f64 / durations.len() as f64).round() as u64;
        Some(TimingStats {
            fastest_seconds,
            average_seconds,
        })
    }
}
