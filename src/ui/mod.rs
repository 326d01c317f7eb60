pub mod difficulty_selector_ui;
pub mod guess_panel_ui;
pub mod leaderboard_ui;
pub mod player_ui;
pub mod round_clock_ui;
pub mod window;
