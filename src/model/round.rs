use uuid::Uuid;

use super::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    InProgress,
    Won,
    GaveUp,
}

/// One play-through from answer selection to resolution. Created on play,
/// dropped once its result lands on the scoreboard.
#[derive(Debug, Clone)]
pub struct Round {
    pub difficulty: Difficulty,
    pub answer: u32,
    pub guess_count: u32,
    pub phase: RoundPhase,
    pub round_id: Uuid,
    pub seed: u64,
}

impl Round {
    pub fn new(difficulty: Difficulty, answer: u32, seed: u64) -> Self {
        Self {
            difficulty,
            answer,
            guess_count: 0,
            phase: RoundPhase::InProgress,
            round_id: Uuid::new_v4(),
            seed,
        }
    }

    pub fn range_max(&self) -> u32 {
        self.difficulty.range_max()
    }
}
