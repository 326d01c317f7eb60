mod difficulty;
mod feedback;
mod round;
mod round_command;
mod round_event;
mod score_entry;
mod timer_state;
mod verdict;

pub use difficulty::Difficulty;
pub use feedback::{parse_guess, Direction, InvalidGuess, Proximity, Warmth};
pub use round::{Round, RoundPhase};
pub use round_command::RoundCommand;
pub use round_event::{ControlStates, RoundEvent};
pub use score_entry::{LeaderboardSnapshot, ScoreEntry, TimingStats};
pub use timer_state::{format_clock, TimerState};
pub use verdict::Verdict;
