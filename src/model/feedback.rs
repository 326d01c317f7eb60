//! Guess parsing and the hot/cold proximity feedback given after a miss.

use std::fmt;

/// Rejected guess text: not an integer, or outside `[1, range_max]`.
/// Recovered locally; the round state is never touched by a rejected guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidGuess {
    range_max: u32,
}

impl InvalidGuess {
    pub fn new(range_max: u32) -> Self {
        Self { range_max }
    }
}

impl fmt::Display for InvalidGuess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Enter a valid number from 1-{}", self.range_max)
    }
}

impl std::error::Error for InvalidGuess {}

pub fn parse_guess(raw: &str, range_max: u32) -> Result<u32, InvalidGuess> {
    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| InvalidGuess::new(range_max))?;
    if value < 1 || value > i64::from(range_max) {
        return Err(InvalidGuess::new(range_max));
    }
    Ok(value as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    TooLow,
    TooHigh,
}

impl Direction {
    pub fn phrase(&self) -> &'static str {
        match self {
            Direction::TooLow => "Too low",
            Direction::TooHigh => "Too high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warmth {
    Hot,
    Warm,
    Cool,
    Cold,
}

impl Warmth {
    /// Distance bands scale with the range size but never drop below the
    /// fixed floors, so small ranges keep meaningful bands.
    pub fn classify(diff: u32, range_max: u32) -> Warmth {
        if diff <= scaled_threshold(range_max, 0.05, 2) {
            Warmth::Hot
        } else if diff <= scaled_threshold(range_max, 0.10, 5) {
            Warmth::Warm
        } else if diff <= scaled_threshold(range_max, 0.20, 10) {
            Warmth::Cool
        } else {
            Warmth::Cold
        }
    }

    /// Punctuated form used in feedback messages.
    pub fn exclaim(&self) -> &'static str {
        match self {
            Warmth::Hot => "Hot!",
            Warmth::Warm => "Warm.",
            Warmth::Cool => "Cool.",
            Warmth::Cold => "Cold.",
        }
    }
}

fn scaled_threshold(range_max: u32, fraction: f64, floor: u32) -> u32 {
    ((f64::from(range_max) * fraction).round() as u32).max(floor)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proximity {
    pub direction: Direction,
    pub warmth: Warmth,
}

impl Proximity {
    /// `None` when the guess matches the answer.
    pub fn assess(guess: u32, answer: u32, range_max: u32) -> Option<Proximity> {
        if guess == answer {
            return None;
        }
        let diff = guess.abs_diff(answer);
        Some(Proximity {
            direction: if guess < answer {
                Direction::TooLow
            } else {
                Direction::TooHigh
            },
            warmth: Warmth::classify(diff, range_max),
        })
    }
}
