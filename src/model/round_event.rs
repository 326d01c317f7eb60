use super::{LeaderboardSnapshot, TimerState};

/// Sensitivity flags for the game controls. The engine is the single owner
/// of these; widgets apply them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlStates {
    pub play_enabled: bool,
    pub guess_enabled: bool,
    pub give_up_enabled: bool,
    pub level_select_enabled: bool,
}

impl ControlStates {
    pub fn idle() -> Self {
        Self {
            play_enabled: true,
            guess_enabled: false,
            give_up_enabled: false,
            level_select_enabled: true,
        }
    }

    pub fn in_round() -> Self {
        Self {
            play_enabled: false,
            guess_enabled: true,
            give_up_enabled: true,
            level_select_enabled: false,
        }
    }
}

/// Engine-to-UI channel vocabulary.
#[derive(Debug, Clone)]
pub enum RoundEvent {
    /// Status or feedback text for the message banner.
    MessageChanged(String),
    ControlsChanged(ControlStates),
    TimerStateChanged(TimerState),
    LeaderboardUpdated(LeaderboardSnapshot),
}
