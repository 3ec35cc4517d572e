//! Main application module for Rosterly
//!
//! This module implements the eframe App trait for the main application,
//! wiring user input (drops, dialogs, sidebar actions, shortcuts) into
//! the session state machine and the background conversion worker.

use crate::config::WindowSize;
use crate::convert::{ConvertClient, ConversionWorker};
use crate::export::{copy_output, save_output};
use crate::files::dialogs::{open_roster_dialog, save_output_dialog};
use crate::state::{AppState, SessionPhase};
use crate::ui::{AboutPanel, Sidebar, SidebarAction};
use eframe::egui;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Duration;

/// Keyboard shortcut actions that need to be deferred.
///
/// These actions are detected in the input handling closure and executed
/// afterwards to avoid borrow conflicts.
#[derive(Debug, Clone, Copy)]
enum KeyboardAction {
    /// Open the roster dialog (Ctrl+O)
    LoadRoster,
    /// Save output (Ctrl+S)
    SaveOutput,
    /// Copy output (Ctrl+Shift+C)
    CopyOutput,
    /// Open help panel (F1)
    ToggleHelp,
}

/// The main application struct that holds all state and implements eframe::App.
pub struct RosterlyApp {
    /// Central application state
    state: AppState,
    /// Background conversion worker
    worker: ConversionWorker,
    /// Sidebar component
    sidebar: Sidebar,
    /// Help/About panel component
    about_panel: AboutPanel,
    /// Application start time for timing toast messages
    start_time: std::time::Instant,
    /// Last known window size (for detecting changes)
    last_window_size: Option<egui::Vec2>,
    /// Last known window position (for detecting changes)
    last_window_pos: Option<egui::Pos2>,
}

impl RosterlyApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        info!("Initializing Rosterly");

        Self {
            state: AppState::new(),
            worker: ConversionWorker::new(),
            sidebar: Sidebar::new(),
            about_panel: AboutPanel::new(),
            start_time: std::time::Instant::now(),
            last_window_size: None,
            last_window_pos: None,
        }
    }

    /// Get elapsed app time in seconds (for toast timing).
    fn get_app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Submission
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a conversion for the given roster file.
    ///
    /// Enters `Pending` synchronously; the file read and the network
    /// round trip happen on a worker thread.
    fn submit_roster(&mut self, path: PathBuf) {
        info!("Submitting roster: {}", path.display());

        if let Some(dir) = path.parent() {
            let dir = dir.to_path_buf();
            self.state
                .update_settings(|s| s.last_roster_directory = Some(dir));
        }

        let (format, options) = self.state.snapshot();
        let generation = self.state.begin_submission();

        match ConvertClient::new(self.state.settings.endpoint.clone()) {
            Ok(client) => self.worker.submit(generation, path, format, options, client),
            Err(e) => {
                self.state.apply_outcome(generation, Err(e));
            }
        }
    }

    /// Apply any outcomes the worker has delivered since last frame.
    fn poll_outcomes(&mut self) {
        for outcome in self.worker.poll() {
            self.state.apply_outcome(outcome.generation, outcome.result);
        }
    }

    /// Handle files dropped onto the application window.
    ///
    /// Only the first dropped path that is a file is submitted; further
    /// items and non-files are ignored without error.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });

        if dropped.is_empty() {
            return;
        }

        if let Some(file) = dropped.iter().find(|p| p.is_file()) {
            if dropped.len() > 1 {
                debug!("{} items dropped, taking the first file", dropped.len());
            }
            self.submit_roster(file.clone());
        } else {
            warn!("Dropped items contained no file");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_load_roster(&mut self) {
        let initial_dir = self.state.settings.last_roster_directory.clone();
        if let Some(path) = open_roster_dialog(initial_dir.as_ref()) {
            self.submit_roster(path);
        }
    }

    fn handle_save_output(&mut self) {
        let format = self.state.format();
        let initial_dir = self.state.settings.save_directory(format).cloned();

        let Some(path) = save_output_dialog(format, initial_dir.as_ref()) else {
            return;
        };

        let time = self.get_app_time();
        match save_output(&path, format, self.state.output()) {
            Ok(()) => {
                if let Some(dir) = path.parent() {
                    let dir = dir.to_path_buf();
                    self.state
                        .update_settings(|s| s.set_save_directory(format, dir));
                }
                self.state
                    .show_toast(format!("Saved: {}", path.display()), time, 3.0);
            }
            Err(e) => {
                warn!("Save failed: {}", e);
                self.state.show_toast(format!("Save failed: {}", e), time, 4.0);
            }
        }
    }

    fn handle_copy_output(&mut self) {
        let time = self.get_app_time();
        match copy_output(self.state.format(), self.state.output()) {
            Ok(()) => {
                self.state.show_toast("Copied to clipboard", time, 2.0);
            }
            Err(e) => {
                warn!("Copy failed: {}", e);
                self.state.show_toast(format!("Copy failed: {}", e), time, 4.0);
            }
        }
    }

    fn handle_sidebar_action(&mut self, action: SidebarAction) {
        match action {
            SidebarAction::FormatSelected(format) => self.state.set_format(format),
            SidebarAction::AllDayEventsToggled(enabled) => self.state.set_all_day_events(enabled),
            SidebarAction::LoadRoster => self.handle_load_roster(),
            SidebarAction::SaveOutput => self.handle_save_output(),
            SidebarAction::CopyOutput => self.handle_copy_output(),
            SidebarAction::ShowHelp => self.state.toggle_about(),
        }
    }

    /// Handle keyboard shortcuts.
    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let mut actions: Vec<KeyboardAction> = Vec::new();

        ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::O) {
                actions.push(KeyboardAction::LoadRoster);
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::S) {
                actions.push(KeyboardAction::SaveOutput);
            }
            if i.consume_key(
                egui::Modifiers::COMMAND | egui::Modifiers::SHIFT,
                egui::Key::C,
            ) {
                actions.push(KeyboardAction::CopyOutput);
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::F1) {
                actions.push(KeyboardAction::ToggleHelp);
            }
        });

        for action in actions {
            debug!("Keyboard shortcut: {:?}", action);
            match action {
                KeyboardAction::LoadRoster => self.handle_load_roster(),
                KeyboardAction::SaveOutput => self.handle_save_output(),
                KeyboardAction::CopyOutput => self.handle_copy_output(),
                KeyboardAction::ToggleHelp => self.state.toggle_about(),
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Window State
    // ─────────────────────────────────────────────────────────────────────────

    /// Update window size in settings if changed.
    fn update_window_state(&mut self, ctx: &egui::Context) {
        let mut changed = false;

        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                let current_size = rect.size();
                let current_pos = rect.min;

                let size_changed = self
                    .last_window_size
                    .map(|s| (s - current_size).length() > 1.0)
                    .unwrap_or(true);
                let pos_changed = self
                    .last_window_pos
                    .map(|p| (p - current_pos).length() > 1.0)
                    .unwrap_or(true);

                if size_changed || pos_changed {
                    self.last_window_size = Some(current_size);
                    self.last_window_pos = Some(current_pos);
                    changed = true;
                }
            }
        });

        if changed {
            if let (Some(size), Some(pos)) = (self.last_window_size, self.last_window_pos) {
                let maximized = ctx.input(|i| i.viewport().maximized.unwrap_or(false));

                self.state.settings.window_size = WindowSize {
                    width: size.x,
                    height: size.y,
                    x: Some(pos.x),
                    y: Some(pos.y),
                    maximized,
                };
                self.state.mark_settings_dirty();
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn render_ui(&mut self, ctx: &egui::Context) {
        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(toast) = &self.state.ui.toast_message {
                    ui.label(toast);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(self.state.format().label());
                });
            });
        });

        // Sidebar with format selector, options, and actions
        let mut action = None;
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(160.0)
            .show(ctx, |ui| {
                action = self.sidebar.show(
                    ui,
                    self.state.format(),
                    self.state.all_day_events(),
                    self.state.phase().is_pending(),
                );
            });
        if let Some(action) = action {
            self.handle_sidebar_action(action);
        }

        // Output area
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.state.phase() {
                    SessionPhase::Pending => {
                        ui.add_space(8.0);
                        ui.weak("Working…");
                    }
                    SessionPhase::Failed => {
                        ui.add_space(8.0);
                        ui.colored_label(
                            ui.visuals().error_fg_color,
                            format!(
                                "Conversion failed.\n\n{}",
                                self.state.failure_message().unwrap_or("Unknown error")
                            ),
                        );
                    }
                    SessionPhase::Idle | SessionPhase::Populated => {
                        let mut text = self.state.output();
                        ui.add_sized(
                            ui.available_size(),
                            egui::TextEdit::multiline(&mut text)
                                .font(egui::TextStyle::Monospace)
                                .desired_width(f32::INFINITY),
                        );
                    }
                });
        });

        // Help panel (modal window)
        let mut show_about = self.state.ui.show_about;
        self.about_panel.show(ctx, &mut show_about);
        self.state.ui.show_about = show_about;
    }
}

impl eframe::App for RosterlyApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Update toast message (clear if expired)
        let current_time = self.get_app_time();
        self.state.update_toast(current_time);

        // Track window size/position changes for persistence
        self.update_window_state(ctx);

        // Handle drag-drop of roster files
        self.handle_dropped_files(ctx);

        // Apply finished conversions
        self.poll_outcomes();

        // The worker reports over a polled channel, so keep frames coming
        // while a submission is outstanding.
        if self.state.phase().is_pending() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // Render the main UI
        self.render_ui(ctx);

        // Handle keyboard shortcuts AFTER render so widget focus wins
        self.handle_keyboard_shortcuts(ctx);
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.state.shutdown();
    }

    /// Save persistent state.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        debug!("Saving application state");
        self.state.save_settings_if_dirty();
    }

    /// Auto-save interval in seconds.
    fn auto_save_interval(&self) -> Duration {
        Duration::from_secs(30)
    }
}
