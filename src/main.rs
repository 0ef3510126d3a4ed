//! Bridge Dash - Georgia Bridges Dashboard
//!
//! Loads the bridge inventory CSV once and shows a map of the oldest bridges,
//! bridge counts per owner agency, traffic per main span material and a
//! small photo gallery.

mod charts;
mod config;
mod data;
mod gallery;
mod gui;

use anyhow::Context;
use config::AppConfig;
use eframe::egui;
use gui::BridgeDashApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    log::info!(
        "Bridge data: {}, images: {}",
        config.csv_path.display(),
        config.image_dir.display()
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Bridge Dash"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Bridge Dash",
        options,
        Box::new(move |cc| Ok(Box::new(BridgeDashApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Window failed: {}", e))
}
