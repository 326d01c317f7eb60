use log::{info, trace};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use super::scoreboard::Scoreboard;
use super::settings::Settings;
use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::helpers::Capitalize;
use crate::model::{
    format_clock, parse_guess, ControlStates, Difficulty, Proximity, Round, RoundCommand,
    RoundEvent, RoundPhase, ScoreEntry, TimerState,
};

/// Owns all game state for the session: the player name, the round in
/// flight, the round timer and the scoreboard. Driven entirely by
/// `RoundCommand`s; every observable change goes out as a `RoundEvent`.
pub struct RoundEngine {
    player_name: String,
    round: Option<Round>,
    timer_state: TimerState,
    scoreboard: Scoreboard,
    debug_mode: bool,
    subscription: Option<Unsubscriber<RoundCommand>>,
    event_emitter: EventEmitter<RoundEvent>,
}

impl Destroyable for RoundEngine {
    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl RoundEngine {
    pub fn new(
        command_observer: EventObserver<RoundCommand>,
        event_emitter: EventEmitter<RoundEvent>,
    ) -> Rc<RefCell<Self>> {
        let engine = Self {
            player_name: String::new(),
            round: None,
            timer_state: TimerState::default(),
            scoreboard: Scoreboard::new(),
            debug_mode: Settings::is_debug_mode(),
            subscription: None,
            event_emitter,
        };
        let refcell = Rc::new(RefCell::new(engine));
        RoundEngine::wire_subscription(refcell.clone(), command_observer);
        refcell
    }

    fn wire_subscription(
        engine: Rc<RefCell<Self>>,
        command_observer: EventObserver<RoundCommand>,
    ) {
        let handler = engine.clone();
        let subscription = command_observer.subscribe(move |command| {
            let mut engine = handler.borrow_mut();
            engine.handle_command(command.clone());
        });
        engine.borrow_mut().subscription = Some(subscription);
    }

    fn handle_command(&mut self, command: RoundCommand) {
        trace!(target: "round_engine", "Handling command: {:?}", command);
        match command {
            RoundCommand::StartRound(difficulty, seed) => self.start_round(difficulty, seed),
            RoundCommand::SubmitGuess(raw) => self.submit_guess(&raw),
            RoundCommand::GiveUp => self.give_up(),
            RoundCommand::SetPlayerName(name) => self.player_name = name,
            RoundCommand::InitDisplay => self.sync_display(),
            RoundCommand::Quit => (),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.round
            .as_ref()
            .map(|round| round.phase)
            .unwrap_or(RoundPhase::Idle)
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    fn start_round(&mut self, difficulty: Difficulty, seed: Option<u64>) {
        // UI keeps Play insensitive during a round; a stray command is ignored
        if self.phase() == RoundPhase::InProgress {
            return;
        }

        let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
        let mut rng = StdRng::seed_from_u64(seed);
        let range_max = difficulty.range_max();
        let answer = rng.random_range(1..=range_max);
        info!(target: "round_engine", "New round; difficulty: {:?}; seed: {}", difficulty, seed);
        if self.debug_mode {
            info!(target: "round_engine", "The answer is {}", answer);
        }

        self.round = Some(Round::new(difficulty, answer, seed));
        self.timer_state = TimerState::started(SystemTime::now());

        self.emit_message(format!("Guess a number from 1-{}", range_max));
        self.event_emitter
            .emit(&RoundEvent::ControlsChanged(ControlStates::in_round()));
        self.event_emitter
            .emit(&RoundEvent::TimerStateChanged(self.timer_state.clone()));
    }

    fn submit_guess(&mut self, raw: &str) {
        let (answer, range_max) = match &self.round {
            Some(round) if round.phase == RoundPhase::InProgress => {
                (round.answer, round.range_max())
            }
            _ => return,
        };

        let guess = match parse_guess(raw, range_max) {
            Ok(guess) => guess,
            Err(invalid) => {
                trace!(target: "round_engine", "Rejected guess {:?}", raw);
                self.emit_message(invalid.to_string());
                return;
            }
        };

        if let Some(round) = self.round.as_mut() {
            round.guess_count += 1;
        }

        if guess == answer {
            let duration = self.stop_timer();
            let guess_count = self
                .round
                .as_ref()
                .map(|round| round.guess_count)
                .unwrap_or(0);
            let message = format!(
                "You got it, {}! It took you {} tries. Round time: {}. Press play to play again.",
                self.display_name(),
                guess_count,
                format_clock(duration)
            );
            self.record_result(RoundPhase::Won, duration, message);
        } else if let Some(proximity) = Proximity::assess(guess, answer, range_max) {
            self.emit_message(format!(
                "{}, {}. {} Try again.",
                proximity.direction.phrase(),
                self.display_name(),
                proximity.warmth.exclaim()
            ));
        }
    }

    fn give_up(&mut self) {
        let (answer, range_max) = match &self.round {
            Some(round) if round.phase == RoundPhase::InProgress => {
                (round.answer, round.range_max())
            }
            _ => return,
        };

        // the full range size is the penalty score
        if let Some(round) = self.round.as_mut() {
            round.guess_count = range_max;
        }

        let duration = self.stop_timer();
        let message = format!(
            "You gave up, {}. The answer was {}. Your score is {}. Round time: {}.",
            self.display_name(),
            answer,
            range_max,
            format_clock(duration)
        );
        self.record_result(RoundPhase::GaveUp, duration, message);
    }

    fn stop_timer(&mut self) -> u64 {
        self.timer_state = self.timer_state.ended(SystemTime::now());
        self.event_emitter
            .emit(&RoundEvent::TimerStateChanged(self.timer_state.clone()));
        self.timer_state.elapsed_seconds()
    }

    fn record_result(&mut self, phase: RoundPhase, duration: u64, message: String) {
        let Some(mut round) = self.round.take() else {
            return;
        };
        round.phase = phase;
        info!(
            target: "round_engine",
            "Round over; phase: {:?}; score: {}; duration: {}s; seed: {}",
            phase, round.guess_count, duration, round.seed
        );

        let name = self.record_name();
        let entry = ScoreEntry {
            name: name.clone(),
            score: round.guess_count,
            duration_seconds: Some(duration),
            range_max: round.range_max(),
            recorded_at: unix_now(),
            round_id: round.round_id,
        };
        let verdict = entry.verdict();
        let snapshot = self.scoreboard.record(entry);

        self.emit_message(format!("{} {}'s result: {}.", message, name, verdict));
        self.event_emitter
            .emit(&RoundEvent::LeaderboardUpdated(snapshot));
        self.reset_round();
    }

    fn reset_round(&mut self) {
        self.round = None;
        self.timer_state = TimerState::stopped(SystemTime::now());
        self.event_emitter
            .emit(&RoundEvent::TimerStateChanged(self.timer_state.clone()));
        self.event_emitter
            .emit(&RoundEvent::ControlsChanged(ControlStates::idle()));
    }

    fn sync_display(&mut self) {
        let controls = if self.phase() == RoundPhase::InProgress {
            ControlStates::in_round()
        } else {
            ControlStates::idle()
        };
        self.event_emitter
            .emit(&RoundEvent::ControlsChanged(controls));
        self.event_emitter
            .emit(&RoundEvent::TimerStateChanged(self.timer_state.clone()));
        self.event_emitter
            .emit(&RoundEvent::LeaderboardUpdated(self.scoreboard.snapshot()));
    }

    fn emit_message(&self, message: String) {
        self.event_emitter.emit(&RoundEvent::MessageChanged(message));
    }

    /// Name used in messages addressed at the player.
    fn display_name(&self) -> String {
        let trimmed = self.player_name.trim();
        if trimmed.is_empty() {
            "Player".to_string()
        } else {
            trimmed.capitalize()
        }
    }

    /// Name stamped onto recorded entries.
    fn record_name(&self) -> String {
        let trimmed = self.player_name.trim();
        if trimmed.is_empty() {
            "Anonymous".to_string()
        } else {
            trimmed.capitalize()
        }
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use test_context::test_context;

    use crate::events::Channel;
    use crate::model::{LeaderboardSnapshot, Verdict};
    use crate::tests::UsingLogger;

    use super::*;

    struct Harness {
        commands: EventEmitter<RoundCommand>,
        engine: Rc<RefCell<RoundEngine>>,
        events: Rc<RefCell<Vec<RoundEvent>>>,
    }

    fn harness() -> Harness {
        let (command_emitter, command_observer) = Channel::<RoundCommand>::new();
        let (event_emitter, event_observer) = Channel::<RoundEvent>::new();
        let engine = RoundEngine::new(command_observer, event_emitter);

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let _ = event_observer.subscribe(move |event: &RoundEvent| {
            sink.borrow_mut().push(event.clone());
        });

        Harness {
            commands: command_emitter,
            engine,
            events,
        }
    }

    impl Harness {
        fn start(&self, difficulty: Difficulty) {
            self.commands
                .emit(&RoundCommand::StartRound(difficulty, Some(42)));
        }

        fn guess(&self, raw: &str) {
            self.commands
                .emit(&RoundCommand::SubmitGuess(raw.to_string()));
        }

        fn answer(&self) -> u32 {
            self.engine
                .borrow()
                .current_round()
                .map(|round| round.answer)
                .expect("no round in progress")
        }

        fn guess_count(&self) -> u32 {
            self.engine
                .borrow()
                .current_round()
                .map(|round| round.guess_count)
                .unwrap_or(0)
        }

        fn last_message(&self) -> String {
            self.events
                .borrow()
                .iter()
                .rev()
                .find_map(|event| match event {
                    RoundEvent::MessageChanged(message) => Some(message.clone()),
                    _ => None,
                })
                .expect("no message emitted")
        }

        fn last_snapshot(&self) -> Option<LeaderboardSnapshot> {
            self.events
                .borrow()
                .iter()
                .rev()
                .find_map(|event| match event {
                    RoundEvent::LeaderboardUpdated(snapshot) => Some(snapshot.clone()),
                    _ => None,
                })
        }

        fn last_controls(&self) -> ControlStates {
            self.events
                .borrow()
                .iter()
                .rev()
                .find_map(|event| match event {
                    RoundEvent::ControlsChanged(controls) => Some(*controls),
                    _ => None,
                })
                .expect("no controls emitted")
        }
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_start_round_draws_answer_in_range(_: &mut UsingLogger) {
        let harness = harness();
        harness.start(Difficulty::Easy);

        assert_eq!(harness.engine.borrow().phase(), RoundPhase::InProgress);
        let answer = harness.answer();
        assert!((1..=10).contains(&answer));
        assert_eq!(harness.last_message(), "Guess a number from 1-10");
        assert_eq!(harness.last_controls(), ControlStates::in_round());
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_same_seed_draws_same_answer(_: &mut UsingLogger) {
        let first = harness();
        first.start(Difficulty::Hard);
        let second = harness();
        second.start(Difficulty::Hard);
        assert_eq!(first.answer(), second.answer());
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_start_is_noop_while_round_in_progress(_: &mut UsingLogger) {
        let harness = harness();
        harness.start(Difficulty::Easy);
        let answer = harness.answer();
        let wrong = if answer == 1 { answer + 1 } else { answer - 1 };
        harness.guess(&wrong.to_string());

        harness
            .commands
            .emit(&RoundCommand::StartRound(Difficulty::Hard, Some(7)));
        assert_eq!(harness.answer(), answer);
        assert_eq!(harness.guess_count(), 1);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_invalid_guesses_do_not_count(_: &mut UsingLogger) {
        let harness = harness();
        harness.start(Difficulty::Easy);

        for raw in ["abc", "", "0", "11", "-2", "3.5"] {
            harness.guess(raw);
            assert_eq!(harness.guess_count(), 0, "input {:?} should not count", raw);
            assert_eq!(harness.last_message(), "Enter a valid number from 1-10");
        }
        assert_eq!(harness.engine.borrow().phase(), RoundPhase::InProgress);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_miss_feedback_names_direction(_: &mut UsingLogger) {
        let harness = harness();
        harness.start(Difficulty::Easy);
        let answer = harness.answer();
        let (wrong, expected) = if answer == 1 {
            (answer + 1, "Too high")
        } else {
            (answer - 1, "Too low")
        };

        harness.guess(&wrong.to_string());
        assert_eq!(harness.guess_count(), 1);
        let message = harness.last_message();
        assert!(message.starts_with(expected), "got {:?}", message);
        assert!(message.ends_with("Try again."));
        assert_eq!(harness.engine.borrow().phase(), RoundPhase::InProgress);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_adjacent_miss_is_hot(_: &mut UsingLogger) {
        let harness = harness();
        harness.start(Difficulty::Easy);
        let answer = harness.answer();
        let wrong = if answer == 1 { answer + 1 } else { answer - 1 };

        harness.guess(&wrong.to_string());
        assert!(harness.last_message().contains("Hot!"));
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_winning_guess_records_and_resets(_: &mut UsingLogger) {
        let harness = harness();
        harness.start(Difficulty::Easy);
        let answer = harness.answer();
        let wrong = if answer == 1 { answer + 1 } else { answer - 1 };

        harness.guess(&wrong.to_string());
        harness.guess(&answer.to_string());

        assert_eq!(harness.engine.borrow().phase(), RoundPhase::Idle);
        assert!(harness.engine.borrow().current_round().is_none());

        let snapshot = harness.last_snapshot().expect("no leaderboard update");
        assert_eq!(snapshot.total_wins, 1);
        let entry = &snapshot.rows[0];
        assert_eq!(entry.score, 2);
        assert_eq!(entry.name, "Anonymous");
        // started and resolved within the same second
        assert_eq!(entry.duration_seconds, Some(0));
        assert_eq!(snapshot.latest_round_id, Some(entry.round_id));

        let message = harness.last_message();
        assert!(message.contains("You got it, Player!"), "got {:?}", message);
        assert!(message.contains("2 tries"));
        assert!(message.contains("Round time: 00:00"));
        assert_eq!(harness.last_controls(), ControlStates::idle());
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_player_name_flows_into_messages_and_entries(_: &mut UsingLogger) {
        let harness = harness();
        harness
            .commands
            .emit(&RoundCommand::SetPlayerName("riley".to_string()));
        harness.start(Difficulty::Easy);
        harness.guess(&harness.answer().to_string());

        let snapshot = harness.last_snapshot().unwrap();
        assert_eq!(snapshot.rows[0].name, "Riley");
        assert!(harness.last_message().contains("You got it, Riley!"));
        assert!(harness.last_message().contains("Riley's result: Good."));
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_give_up_scores_the_full_range_and_reveals_answer(_: &mut UsingLogger) {
        let harness = harness();
        harness.start(Difficulty::Easy);
        let answer = harness.answer();
        harness.commands.emit(&RoundCommand::GiveUp);

        let snapshot = harness.last_snapshot().expect("no leaderboard update");
        let entry = &snapshot.rows[0];
        assert_eq!(entry.score, 10);
        assert_eq!(snapshot.latest_verdict, Some(Verdict::Awful));

        let message = harness.last_message();
        assert!(message.contains(&format!("The answer was {}", answer)));
        assert!(message.contains("Your score is 10"));
        assert!(message.contains("result: Awful."));
        assert_eq!(harness.engine.borrow().phase(), RoundPhase::Idle);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_commands_without_a_round_are_noops(_: &mut UsingLogger) {
        let harness = harness();
        harness.guess("5");
        harness.commands.emit(&RoundCommand::GiveUp);

        assert_eq!(harness.engine.borrow().phase(), RoundPhase::Idle);
        assert!(harness.last_snapshot().is_none());
        assert!(harness.events.borrow().is_empty());
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_leaderboard_accumulates_across_rounds(_: &mut UsingLogger) {
        let harness = harness();
        for _ in 0..2 {
            harness.start(Difficulty::Easy);
            harness.commands.emit(&RoundCommand::GiveUp);
        }

        let snapshot = harness.last_snapshot().unwrap();
        assert_eq!(snapshot.total_wins, 2);
        assert_eq!(snapshot.average_score, 10.0);
        let timing = snapshot.timing.unwrap();
        assert_eq!(timing.fastest_seconds, 0);
        assert_eq!(harness.engine.borrow().scoreboard().entries().len(), 2);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_init_display_resends_current_state(_: &mut UsingLogger) {
        let harness = harness();
        harness.commands.emit(&RoundCommand::InitDisplay);

        assert_eq!(harness.last_controls(), ControlStates::idle());
        let snapshot = harness.last_snapshot().unwrap();
        assert_eq!(snapshot.total_wins, 0);
    }
}
