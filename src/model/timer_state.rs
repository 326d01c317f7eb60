use std::time::{Duration, SystemTime};

use serde_with::serde_as;
use serde_with::TimestampSeconds;

/// Round timer as a pair of wall-clock timestamps. Elapsed time is always
/// derived, never accumulated, so a stray display tick cannot corrupt a
/// round's duration.
#[serde_as]
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TimerState {
    #[serde_as(as = "TimestampSeconds")]
    pub started_timestamp: SystemTime,
    #[serde_as(as = "Option<TimestampSeconds>")]
    pub ended_timestamp: Option<SystemTime>,
}

impl Default for TimerState {
    fn default() -> Self {
        TimerState::stopped(SystemTime::now())
    }
}

impl TimerState {
    /// A running timer starting at `now`.
    pub fn started(now: SystemTime) -> TimerState {
        TimerState {
            started_timestamp: now,
            ended_timestamp: None,
        }
    }

    /// A zeroed, idle timer: start and end coincide, so it reads 00:00.
    pub fn stopped(now: SystemTime) -> TimerState {
        TimerState {
            started_timestamp: now,
            ended_timestamp: Some(now),
        }
    }

    pub fn is_running(&self) -> bool {
        self.ended_timestamp.is_none()
    }

    pub fn ended(&self, now: SystemTime) -> TimerState {
        let mut new_state = self.clone();
        new_state.ended_timestamp = Some(now);
        new_state
    }

    pub fn elapsed(&self) -> Duration {
        let until_time = self.ended_timestamp.unwrap_or_else(SystemTime::now);

        until_time
            .duration_since(self.started_timestamp)
            .unwrap_or(Duration::default())
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed().as_secs()
    }

    pub fn clock(&self) -> String {
        format_clock(self.elapsed_seconds())
    }
}

/// `MM:SS`, both fields zero-padded. Minutes keep counting past 59; there is
/// no hour rollover.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
