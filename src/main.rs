mod app;
mod utils;
mod api;
mod state;
mod ui;
mod storage;

use adw::prelude::*;
use adw::Application;

fn main() {
    let app = Application::builder()
        .application_id("com.example.PhonebookGtk")
        .build();
    app.connect_activate(|app| {
        if let Err(e) = crate::storage::init() {
            log::warn!("contact cache unavailable: {e}");
        }
        crate::app::build_ui(app);
    });
    app.run();
}
