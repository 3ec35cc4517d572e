// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Rosterly - Main Entry Point
//!
//! Converts AIMS crew rosters to flight journal, iCalendar, or CSV output
//! via the remote conversion service. Built with Rust and egui.

mod app;
mod config;
mod convert;
mod error;
mod export;
mod files;
mod state;
mod ui;

use app::RosterlyApp;
use config::load_config;
use log::info;

/// Application name constant.
const APP_NAME: &str = "Rosterly";

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    // Load settings to get window configuration
    let settings = load_config();
    let window_size = &settings.window_size;

    info!(
        "Window configuration: {}x{}, maximized: {}",
        window_size.width, window_size.height, window_size.maximized
    );

    // Configure the native window
    let mut viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([window_size.width, window_size.height])
        .with_min_inner_size([480.0, 320.0])
        .with_drag_and_drop(true);

    // Apply position if saved
    if let (Some(x), Some(y)) = (window_size.x, window_size.y) {
        viewport = viewport.with_position([x, y]);
    }

    // Apply maximized state
    if window_size.maximized {
        viewport = viewport.with_maximized(true);
    }

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(RosterlyApp::new(cc)))),
    )
}
