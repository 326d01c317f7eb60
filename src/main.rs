use gtk4::prelude::*;
use gtk4::Application;

use numberhunt::ui::window::build_ui;

const APP_ID: &str = "org.numberhunt.NumberHunt";

fn init_logging() {
    env_logger::init();
}

fn main() {
    init_logging();

    // Create a new application
    let app = Application::builder().application_id(APP_ID).build();

    // Connect to "activate" signal
    app.connect_activate(build_ui);

    // Run the application
    app.run();
}
