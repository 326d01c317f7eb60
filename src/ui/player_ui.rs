// player name entry; the engine normalizes whatever is typed here

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Entry, Label, Orientation};

use crate::events::EventEmitter;
use crate::model::RoundCommand;

pub struct PlayerUI {
    pub container: gtk4::Box,
    pub name_entry: Entry,
}

impl PlayerUI {
    pub fn new(command_emitter: EventEmitter<RoundCommand>) -> Rc<RefCell<Self>> {
        let name_label = Label::new(Some("Player:"));

        let name_entry = Entry::builder()
            .placeholder_text("Anonymous")
            .max_length(24)
            .build();

        name_entry.connect_changed(move |entry| {
            command_emitter.emit(&RoundCommand::SetPlayerName(entry.text().to_string()));
        });

        let container = gtk4::Box::builder()
            .name("player-box")
            .orientation(Orientation::Horizontal)
            .spacing(5)
            .build();
        container.append(&name_label);
        container.append(&name_entry);

        Rc::new(RefCell::new(Self {
            container,
            name_entry,
        }))
    }
}
