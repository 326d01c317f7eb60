// difficulty selector; locked while a round is in flight

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{DropDown, Label, Orientation};
use log::error;

use crate::destroyable::Destroyable;
use crate::events::{EventObserver, Unsubscriber};
use crate::game::settings::Settings;
use crate::model::{Difficulty, RoundEvent};

pub struct DifficultySelectorUI {
    pub container: gtk4::Box,
    pub selector: DropDown,
    subscription: Option<Unsubscriber<RoundEvent>>,
}

impl Destroyable for DifficultySelectorUI {
    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl DifficultySelectorUI {
    pub fn new(
        round_event_observer: EventObserver<RoundEvent>,
        settings: Rc<RefCell<Settings>>,
    ) -> Rc<RefCell<Self>> {
        let difficulty_label = Label::new(Some("Difficulty:"));

        let all_difficulties = Difficulty::all()
            .iter()
            .map(|difficulty| difficulty.label())
            .collect::<Vec<String>>();
        let selector = DropDown::from_strings(
            all_difficulties
                .iter()
                .map(|label| label.as_str())
                .collect::<Vec<&str>>()
                .as_slice(),
        );
        selector.set_tooltip_text(Some("Select Difficulty"));
        selector.set_selected(settings.borrow().difficulty.index() as u32);

        selector.connect_selected_notify(move |selector| {
            let new_difficulty = Difficulty::from_index(selector.selected() as usize);
            settings.borrow_mut().difficulty = new_difficulty;
            if let Err(e) = settings.borrow().save() {
                error!(target: "difficulty_selector_ui", "Failed to save settings: {}", e);
            }
        });

        let container = gtk4::Box::builder()
            .name("difficulty-box")
            .orientation(Orientation::Horizontal)
            .spacing(5)
            .build();
        container.append(&difficulty_label);
        container.append(&selector);

        let selector_ui = Rc::new(RefCell::new(Self {
            container,
            selector,
            subscription: None,
        }));

        DifficultySelectorUI::bind_observer(selector_ui.clone(), round_event_observer);

        selector_ui
    }

    fn bind_observer(
        selector_ui: Rc<RefCell<Self>>,
        round_event_observer: EventObserver<RoundEvent>,
    ) {
        let subscription = {
            let selector_ui = selector_ui.clone();
            round_event_observer.subscribe(move |event| {
                if let RoundEvent::ControlsChanged(controls) = event {
                    selector_ui
                        .borrow()
                        .selector
                        .set_sensitive(controls.level_select_enabled);
                }
            })
        };

        selector_ui.borrow_mut().subscription = Some(subscription);
    }
}
