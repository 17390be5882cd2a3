mod app;
mod utils;
mod api;
mod dashboard;
mod ui;

use adw::prelude::*;
use adw::Application;

fn main() -> gtk4::glib::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = Application::builder()
        .application_id("com.example.MonitorDashboard")
        .build();
    app.connect_activate(|app| {
        crate::app::build_ui(app);
    });
    app.run()
}
