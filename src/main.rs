mod app;
mod color;
mod config;
mod state;
mod ui;

use app::DashboardApp;
use clap::Parser;
use config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();
    let config = Config::parse();
    log::debug!("Starting with {config:?}");

    let app = DashboardApp::new(&config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Space Missions Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
