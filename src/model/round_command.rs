use super::Difficulty;

/// UI-to-engine channel vocabulary.
#[derive(Debug, Clone)]
pub enum RoundCommand {
    /// Begin a round at the given difficulty; the seed, when present, makes
    /// the answer draw reproducible.
    StartRound(Difficulty, Option<u64>),
    /// Raw guess text as typed; the engine does all validation.
    SubmitGuess(String),
    GiveUp,
    SetPlayerName(String),
    /// Re-emit current state so late-constructed widgets can sync.
    InitDisplay,
    Quit,
}
