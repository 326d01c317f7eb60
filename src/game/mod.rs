pub mod round_engine;
pub mod scoreboard;
pub mod settings;

pub use round_engine::RoundEngine;
pub use scoreboard::Scoreboard;
