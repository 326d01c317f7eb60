// play / guess / give-up controls plus the status message banner

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Align, Button, Entry, Label, Orientation};
use log::trace;

use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::game::settings::Settings;
use crate::model::{ControlStates, RoundCommand, RoundEvent};

pub struct GuessPanelUI {
    pub container: gtk4::Box,
    pub play_button: Button,
    pub guess_entry: Entry,
    pub guess_button: Button,
    pub give_up_button: Button,
    pub message_label: Label,
    subscription: Option<Unsubscriber<RoundEvent>>,
}

impl Destroyable for GuessPanelUI {
    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl GuessPanelUI {
    pub fn new(
        round_event_observer: EventObserver<RoundEvent>,
        command_emitter: EventEmitter<RoundCommand>,
        settings: Rc<RefCell<Settings>>,
    ) -> Rc<RefCell<Self>> {
        let message_label = Label::builder()
            .label("Press play to start a round")
            .halign(Align::Start)
            .css_classes(["game-message"])
            .build();

        let play_button = Button::with_label("Play");
        play_button.set_tooltip_text(Some("Start a round at the selected difficulty"));

        let guess_entry = Entry::builder()
            .placeholder_text("Your guess")
            .sensitive(false)
            .build();

        let guess_button = Button::with_label("Guess");
        guess_button.set_sensitive(false);

        let give_up_button = Button::with_label("Give Up");
        give_up_button.set_sensitive(false);

        let controls_box = gtk4::Box::builder()
            .orientation(Orientation::Horizontal)
            .spacing(5)
            .build();
        controls_box.append(&play_button);
        controls_box.append(&guess_entry);
        controls_box.append(&guess_button);
        controls_box.append(&give_up_button);

        let container = gtk4::Box::builder()
            .name("guess-panel")
            .orientation(Orientation::Vertical)
            .spacing(10)
            .build();
        container.append(&message_label);
        container.append(&controls_box);

        let panel = Rc::new(RefCell::new(Self {
            container,
            play_button,
            guess_entry,
            guess_button,
            give_up_button,
            message_label,
            subscription: None,
        }));

        GuessPanelUI::wire_controls(panel.clone(), command_emitter, settings);
        GuessPanelUI::bind_observer(panel.clone(), round_event_observer);

        panel
    }

    fn wire_controls(
        panel: Rc<RefCell<Self>>,
        command_emitter: EventEmitter<RoundCommand>,
        settings: Rc<RefCell<Settings>>,
    ) {
        let play_emitter = command_emitter.clone();
        panel.borrow().play_button.connect_clicked(move |_| {
            let difficulty = settings.borrow().difficulty;
            play_emitter.emit(&RoundCommand::StartRound(
                difficulty,
                Settings::seed_from_env(),
            ));
        });

        let submit_from_entry = {
            let guess_emitter = command_emitter.clone();
            move |entry: &Entry| {
                guess_emitter.emit(&RoundCommand::SubmitGuess(entry.text().to_string()));
                entry.select_region(0, -1);
            }
        };

        let entry_handler = submit_from_entry.clone();
        panel.borrow().guess_entry.connect_activate(move |entry| {
            entry_handler(entry);
        });

        let entry_for_button = panel.borrow().guess_entry.clone();
        panel.borrow().guess_button.connect_clicked(move |_| {
            submit_from_entry(&entry_for_button);
        });

        let give_up_emitter = command_emitter.clone();
        panel.borrow().give_up_button.connect_clicked(move |_| {
            give_up_emitter.emit(&RoundCommand::GiveUp);
        });
    }

    fn bind_observer(panel: Rc<RefCell<Self>>, round_event_observer: EventObserver<RoundEvent>) {
        let subscription = {
            let panel = panel.clone();
            round_event_observer.subscribe(move |event| {
                panel.borrow_mut().handle_round_event(event);
            })
        };

        panel.borrow_mut().subscription = Some(subscription);
    }

    fn handle_round_event(&mut self, event: &RoundEvent) {
        match event {
            RoundEvent::MessageChanged(message) => {
                self.message_label.set_text(message);
            }
            RoundEvent::ControlsChanged(controls) => self.apply_controls(controls),
            _ => {}
        }
    }

    fn apply_controls(&mut self, controls: &ControlStates) {
        trace!(target: "guess_panel_ui", "Applying controls {:?}", controls);
        self.play_button.set_sensitive(controls.play_enabled);
        self.guess_button.set_sensitive(controls.guess_enabled);
        self.give_up_button.set_sensitive(controls.give_up_enabled);
        self.guess_entry.set_sensitive(controls.guess_enabled);
        self.guess_entry.set_text("");
        if controls.guess_enabled {
            self.guess_entry.grab_focus();
        }
    }
}
