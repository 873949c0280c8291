mod app;
mod chart;
mod color;
mod config;
mod data;
mod reactive;
mod state;
mod ui;

use anyhow::Context;
use app::LaunchDashApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // The dashboard never starts without its data.
    let dataset = data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))
        .inspect_err(|e| log::error!("{e:#}"))?;
    log::info!(
        "Loaded {} launches from {} sites, payload {:?}..={:?} kg",
        dataset.len(),
        dataset.sites().len(),
        dataset.min_payload(),
        dataset.max_payload()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let title = config.title.clone();
    let state = AppState::new(config, dataset);

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
