mod app;
mod color;
mod state;
mod ui;

use std::path::Path;

use anyhow::anyhow;
use app::DashboardApp;
use eframe::egui;
use state::AppState;
use vgsales_dashboard::{DEFAULT_DATASET_PATH, load_file};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Load failures are fatal; no window is opened.
    let dataset = load_file(Path::new(DEFAULT_DATASET_PATH)).inspect_err(|e| {
        log::error!("Failed to load {DEFAULT_DATASET_PATH}: {e:#}");
    })?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Video Game Sales Analysis Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(AppState::new(dataset))))),
    )
    .map_err(|e| anyhow!("{e}"))
}
