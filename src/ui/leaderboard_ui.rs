// leaderboard panel: ranked past rounds plus the session aggregates

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Local, TimeZone};
use gtk4::prelude::*;
use gtk4::{Align, Grid, Label, Orientation};

use crate::destroyable::Destroyable;
use crate::events::{EventObserver, Unsubscriber};
use crate::model::{format_clock, LeaderboardSnapshot, RoundEvent, ScoreEntry};

pub struct LeaderboardUI {
    pub container: gtk4::Box,
    scores_grid: Grid,
    wins_label: Label,
    average_score_label: Label,
    verdict_label: Label,
    fastest_time_label: Label,
    average_time_label: Label,
    subscription: Option<Unsubscriber<RoundEvent>>,
}

impl Destroyable for LeaderboardUI {
    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl LeaderboardUI {
    pub fn new(round_event_observer: EventObserver<RoundEvent>) -> Rc<RefCell<Self>> {
        let title = Label::new(None);
        title.set_markup("<b>Leaderboard</b>");
        title.set_halign(Align::Start);

        let scores_grid = Grid::new();
        scores_grid.set_row_spacing(5);
        scores_grid.set_column_spacing(10);

        let wins_label = stat_label("Total Wins: 0");
        let average_score_label = stat_label("Average Score: -");
        let verdict_label = stat_label("");
        let fastest_time_label = stat_label("Fastest Time: -");
        let average_time_label = stat_label("Average Time: -");

        let container = gtk4::Box::builder()
            .name("leaderboard-panel")
            .orientation(Orientation::Vertical)
            .spacing(5)
            .build();
        container.append(&title);
        container.append(&scores_grid);
        container.append(&wins_label);
        container.append(&average_score_label);
        container.append(&fastest_time_label);
        container.append(&average_time_label);
        container.append(&verdict_label);

        let leaderboard = Rc::new(RefCell::new(Self {
            container,
            scores_grid,
            wins_label,
            average_score_label,
            verdict_label,
            fastest_time_label,
            average_time_label,
            subscription: None,
        }));

        LeaderboardUI::bind_observer(leaderboard.clone(), round_event_observer);

        leaderboard
    }

    fn bind_observer(
        leaderboard: Rc<RefCell<Self>>,
        round_event_observer: EventObserver<RoundEvent>,
    ) {
        let subscription = {
            let leaderboard = leaderboard.clone();
            round_event_observer.subscribe(move |event| {
                if let RoundEvent::LeaderboardUpdated(snapshot) = event {
                    leaderboard.borrow_mut().render(snapshot);
                }
            })
        };

        leaderboard.borrow_mut().subscription = Some(subscription);
    }

    fn render(&mut self, snapshot: &LeaderboardSnapshot) {
        while let Some(child) = self.scores_grid.first_child() {
            self.scores_grid.remove(&child);
        }

        let headers = ["Rank", "Player", "Score", "Time", "Date"];
        for (i, header) in headers.iter().enumerate() {
            let label = Label::new(None);
            label.set_markup(&format!("<b>{}</b>", header));
            self.scores_grid.attach(&label, i as i32, 0, 1, 1);
        }

        for (i, entry) in snapshot.rows.iter().enumerate() {
            let row_index = (i + 1) as i32;
            let is_latest = snapshot.latest_round_id == Some(entry.round_id);

            self.attach_cell(&format!("{}.", i + 1), 0, row_index, Align::End, is_latest);
            self.attach_cell(&entry.name, 1, row_index, Align::Start, is_latest);
            self.attach_cell(
                &entry.score.to_string(),
                2,
                row_index,
                Align::End,
                is_latest,
            );
            let time = entry
                .duration_seconds
                .map(format_clock)
                .unwrap_or_else(|| "-".to_string());
            self.attach_cell(&time, 3, row_index, Align::End, is_latest);
            self.attach_cell(&entry_date(entry), 4, row_index, Align::Start, is_latest);
        }

        self.wins_label
            .set_text(&format!("Total Wins: {}", snapshot.total_wins));
        if snapshot.total_wins > 0 {
            self.average_score_label
                .set_text(&format!("Average Score: {:.2}", snapshot.average_score));
        } else {
            self.average_score_label.set_text("Average Score: -");
        }

        match snapshot.timing {
            Some(timing) => {
                self.fastest_time_label
                    .set_text(&format!("Fastest Time: {}", format_clock(timing.fastest_seconds)));
                self.average_time_label
                    .set_text(&format!("Average Time: {}", format_clock(timing.average_seconds)));
            }
            None => {
                self.fastest_time_label.set_text("Fastest Time: -");
                self.average_time_label.set_text("Average Time: -");
            }
        }

        match snapshot.latest_verdict {
            Some(verdict) => self
                .verdict_label
                .set_text(&format!("Last Result: {}", verdict)),
            None => self.verdict_label.set_text(""),
        }
    }

    fn attach_cell(&self, text: &str, column: i32, row: i32, halign: Align, highlight: bool) {
        let label = Label::new(Some(text));
        label.set_halign(halign);
        if highlight {
            label.add_css_class("highlight-score");
        }
        self.scores_grid.attach(&label, column, row, 1, 1);
    }
}

fn stat_label(text: &str) -> Label {
    let label = Label::new(Some(text));
    label.set_halign(Align::Start);
    label
}

fn entry_date(entry: &ScoreEntry) -> String {
    Local
        .timestamp_opt(entry.recorded_at, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
