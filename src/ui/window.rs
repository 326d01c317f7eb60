use gio::{Menu, SimpleAction};
use gtk4::prelude::*;
use gtk4::{
    AboutDialog, Application, ApplicationWindow, HeaderBar, Label, License, MenuButton,
    Orientation,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::destroyable::Destroyable;
use crate::events::Channel;
use crate::game::round_engine::RoundEngine;
use crate::game::settings::Settings;
use crate::model::{RoundCommand, RoundEvent};

use super::difficulty_selector_ui::DifficultySelectorUI;
use super::guess_panel_ui::GuessPanelUI;
use super::leaderboard_ui::LeaderboardUI;
use super::player_ui::PlayerUI;
use super::round_clock_ui::RoundClockUI;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn build_ui(app: &Application) {
    let (command_emitter, command_observer) = Channel::<RoundCommand>::new();
    let (round_event_emitter, round_event_observer) = Channel::<RoundEvent>::new();

    let settings = Rc::new(RefCell::new(Settings::load()));
    log::info!(target: "window", "Loaded settings: {:?}", settings.borrow());

    let window = Rc::new(
        ApplicationWindow::builder()
            .application(app)
            .title("Number Hunt")
            .resizable(true)
            .default_width(760)
            .default_height(480)
            .build(),
    );

    // Keyboard shortcut for starting a round
    app.set_accels_for_action("win.new-round", &["<Control>n"]);

    let header_bar = HeaderBar::new();

    let difficulty_selector_ui =
        DifficultySelectorUI::new(round_event_observer.clone(), settings.clone());
    header_bar.pack_start(&difficulty_selector_ui.borrow().container);

    let player_ui = PlayerUI::new(command_emitter.clone());
    header_bar.pack_start(&player_ui.borrow().container);

    // Clock group on the left side of the header
    let round_clock_ui = RoundClockUI::new(round_event_observer.clone());
    let clock_box = gtk4::Box::builder()
        .name("clock-box")
        .orientation(Orientation::Horizontal)
        .spacing(5)
        .build();
    let clock_caption = Label::new(Some("Round time:"));
    clock_box.append(&clock_caption);
    clock_box.append(&round_clock_ui.borrow().clock_label);
    header_bar.pack_start(&clock_box);

    let menu = Menu::new();
    menu.append(Some("New Round"), Some("win.new-round"));
    menu.append(Some("About"), Some("win.about"));

    let menu_button = MenuButton::builder()
        .icon_name("open-menu-symbolic")
        .menu_model(&menu)
        .build();
    header_bar.pack_end(&menu_button);

    window.set_titlebar(Some(&header_bar));

    let guess_panel_ui = GuessPanelUI::new(
        round_event_observer.clone(),
        command_emitter.clone(),
        settings.clone(),
    );

    let leaderboard_ui = LeaderboardUI::new(round_event_observer.clone());

    let content_box = gtk4::Box::builder()
        .name("content-box")
        .orientation(Orientation::Horizontal)
        .spacing(20)
        .margin_start(10)
        .margin_end(10)
        .margin_top(10)
        .margin_bottom(10)
        .build();
    content_box.append(&guess_panel_ui.borrow().container);
    content_box.append(&gtk4::Separator::new(Orientation::Vertical));
    content_box.append(&leaderboard_ui.borrow().container);

    window.set_child(Some(&content_box));

    // The engine goes up last so every widget is already subscribed
    let round_engine = RoundEngine::new(command_observer.clone(), round_event_emitter.clone());

    let action_new_round = SimpleAction::new("new-round", None);
    {
        let command_emitter = command_emitter.clone();
        let settings = Rc::clone(&settings);
        action_new_round.connect_activate(move |_, _| {
            let difficulty = settings.borrow().difficulty;
            command_emitter.emit(&RoundCommand::StartRound(
                difficulty,
                Settings::seed_from_env(),
            ));
        });
    }
    window.add_action(&action_new_round);

    let action_about = SimpleAction::new("about", None);
    action_about.connect_activate(move |_, _| {
        let dialog = AboutDialog::builder()
            .program_name("Number Hunt")
            .version(APP_VERSION)
            .comments("A hot-and-cold number guessing game")
            .license_type(License::MitX11)
            .build();
        dialog.present();
    });
    window.add_action(&action_about);

    window.present();

    // Sync the initial control and leaderboard state
    command_emitter.emit(&RoundCommand::InitDisplay);

    window.connect_close_request(move |_| {
        log::info!(target: "window", "Shutting down");
        command_emitter.emit(&RoundCommand::Quit);
        round_engine.borrow_mut().destroy();
        round_clock_ui.borrow_mut().destroy();
        guess_panel_ui.borrow_mut().destroy();
        leaderboard_ui.borrow_mut().destroy();
        difficulty_selector_ui.borrow_mut().destroy();

        glib::signal::Propagation::Proceed
    });
}
