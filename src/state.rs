//! Application state management for Rosterly
//!
//! This module defines the central `AppState` struct that owns the
//! conversion session: the selected output format and options, the
//! single output text buffer, and the session phase driven by
//! submissions and their outcomes. It contains no UI types, so every
//! state transition is directly unit-testable.

// Allow dead code - this module keeps a complete state management API
#![allow(dead_code)]

use crate::config::{load_config, save_config_silent, Settings};
use crate::convert::{Format, OptionSet, OPTION_ALL_DAY_EVENTS};
use crate::error::Error;
use log::{debug, info};

// ─────────────────────────────────────────────────────────────────────────────
// Session Phase
// ─────────────────────────────────────────────────────────────────────────────

/// Where the current conversion session stands.
///
/// Exactly one phase at a time. `Pending` means exactly one live request
/// is outstanding; superseded requests may still be running but their
/// outcomes can no longer land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No request outstanding; output area empty
    #[default]
    Idle,
    /// A submission is in flight; output area shows the working placeholder
    Pending,
    /// The last submission succeeded; output area holds the result
    Populated,
    /// The last submission failed; output area shows the error
    Failed,
}

impl SessionPhase {
    pub fn is_pending(&self) -> bool {
        matches!(self, SessionPhase::Pending)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UI State
// ─────────────────────────────────────────────────────────────────────────────

/// UI-related state flags.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Whether the about/help panel is open
    pub show_about: bool,
    /// Temporary toast message (shown in the status bar)
    pub toast_message: Option<String>,
    /// When the toast message should expire (as seconds since app start)
    pub toast_expires_at: Option<f64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state struct.
///
/// Holds the format/option selection (persisted via `Settings`), the
/// conversion session state machine, and UI flags. All mutation happens
/// on the UI thread through the handler methods below.
#[derive(Debug)]
pub struct AppState {
    /// User settings (loaded from config)
    pub settings: Settings,
    /// UI-related state
    pub ui: UiState,
    /// Current session phase
    phase: SessionPhase,
    /// The single output text buffer
    output: String,
    /// Error message shown while `Failed`
    failure: Option<String>,
    /// Generation number of the live submission. Incremented on every
    /// submission and on every format/option change, so outcomes from
    /// superseded requests are recognizably stale.
    generation: u64,
    /// Whether settings have been modified and need saving
    settings_dirty: bool,
}

impl AppState {
    /// Create a new AppState with settings loaded from config.
    pub fn new() -> Self {
        let settings = load_config();
        info!(
            "AppState initialized (format: {}, all-day events: {})",
            settings.format.wire_name(),
            settings.all_day_events
        );
        Self::with_settings(settings)
    }

    /// Create AppState with custom settings (useful for testing).
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ui: UiState::default(),
            phase: SessionPhase::Idle,
            output: String::new(),
            failure: None,
            generation: 0,
            settings_dirty: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Format / Option State
    // ─────────────────────────────────────────────────────────────────────────

    /// The currently selected output format.
    pub fn format(&self) -> Format {
        self.settings.format
    }

    /// Whether iCalendar output includes all-day events.
    pub fn all_day_events(&self) -> bool {
        self.settings.all_day_events
    }

    /// Select an output format.
    ///
    /// Always clears the output (stale output for another format must
    /// never stay visible) and abandons any in-flight submission.
    pub fn set_format(&mut self, format: Format) {
        debug!("Format selected: {}", format.wire_name());
        if self.settings.format != format {
            self.settings.format = format;
            self.settings_dirty = true;
        }
        self.reset_session();
    }

    /// Toggle the all-day-events option.
    ///
    /// Clears the output like a format change does: rendered output no
    /// longer matches what a submission would now produce.
    pub fn set_all_day_events(&mut self, enabled: bool) {
        debug!("All-day events option: {}", enabled);
        if self.settings.all_day_events != enabled {
            self.settings.all_day_events = enabled;
            self.settings_dirty = true;
        }
        self.reset_session();
    }

    /// Whether the format-specific option panel should be visible.
    pub fn shows_option_panel(&self) -> bool {
        self.settings.format.has_options()
    }

    /// The current `(Format, OptionSet)` pair, by value, as of call time.
    ///
    /// The option flags are sent for every format; the service ignores
    /// the ones a format has no use for.
    pub fn snapshot(&self) -> (Format, OptionSet) {
        let mut options = OptionSet::new();
        options.set(OPTION_ALL_DAY_EVENTS, self.settings.all_day_events);
        (self.settings.format, options)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Conversion Session
    // ─────────────────────────────────────────────────────────────────────────

    /// The current session phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The current output text (empty unless `Populated`).
    pub fn output(&self) -> &str {
        &self.output
    }

    /// The failure message (present only while `Failed`).
    pub fn failure_message(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Start a new submission: clear the output, enter `Pending`, and
    /// return the new submission's generation number.
    ///
    /// Happens synchronously before any I/O, so the working placeholder
    /// is visible from the same frame the file was dropped or picked.
    /// Any previously outstanding submission is superseded.
    pub fn begin_submission(&mut self) -> u64 {
        self.generation += 1;
        self.phase = SessionPhase::Pending;
        self.output.clear();
        self.failure = None;
        debug!("Submission {} pending", self.generation);
        self.generation
    }

    /// Apply a finished submission's outcome.
    ///
    /// Returns `false` (leaving phase and output untouched) if the
    /// outcome belongs to a superseded submission. Otherwise moves the
    /// session to `Populated` or `Failed`.
    pub fn apply_outcome(
        &mut self,
        generation: u64,
        result: Result<String, Error>,
    ) -> bool {
        if generation != self.generation {
            debug!(
                "Dropping stale outcome for submission {} (current: {})",
                generation, self.generation
            );
            return false;
        }

        match result {
            Ok(text) => {
                info!(
                    "Submission {} populated {} bytes of output",
                    generation,
                    text.len()
                );
                self.output = text;
                self.failure = None;
                self.phase = SessionPhase::Populated;
            }
            Err(e) => {
                info!("Submission {} failed: {}", generation, e);
                self.output.clear();
                self.failure = Some(e.to_string());
                self.phase = SessionPhase::Failed;
            }
        }
        true
    }

    /// Abandon the session: clear output, drop any in-flight submission,
    /// and return to `Idle`.
    fn reset_session(&mut self) {
        self.generation += 1;
        self.phase = SessionPhase::Idle;
        self.output.clear();
        self.failure = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings Management
    // ─────────────────────────────────────────────────────────────────────────

    /// Update settings and mark as dirty.
    pub fn update_settings<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        f(&mut self.settings);
        self.settings_dirty = true;
    }

    /// Mark settings as dirty (needing to be saved).
    pub fn mark_settings_dirty(&mut self) {
        self.settings_dirty = true;
    }

    /// Save settings to config file if modified.
    ///
    /// Returns `true` if settings were saved.
    pub fn save_settings_if_dirty(&mut self) -> bool {
        if self.settings_dirty && save_config_silent(&self.settings) {
            self.settings_dirty = false;
            return true;
        }
        false
    }

    /// Prepare state for application shutdown.
    pub fn shutdown(&mut self) {
        self.settings_dirty = true;
        self.save_settings_if_dirty();
        info!("AppState shutdown complete");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UI State Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Toggle the about/help panel.
    pub fn toggle_about(&mut self) {
        self.ui.show_about = !self.ui.show_about;
    }

    /// Show a temporary toast message (disappears after duration).
    ///
    /// `current_time` should be the current app time in seconds.
    /// `duration` is how long to show the message in seconds.
    pub fn show_toast(&mut self, message: impl Into<String>, current_time: f64, duration: f64) {
        self.ui.toast_message = Some(message.into());
        self.ui.toast_expires_at = Some(current_time + duration);
    }

    /// Update toast state - clears expired toasts.
    ///
    /// Call this each frame with the current time.
    pub fn update_toast(&mut self, current_time: f64) {
        if let Some(expires_at) = self.ui.toast_expires_at {
            if current_time >= expires_at {
                self.ui.toast_message = None;
                self.ui.toast_expires_at = None;
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::OPTION_ALL_DAY_EVENTS;

    fn state() -> AppState {
        AppState::with_settings(Settings::default())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Format / Option State Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_initial_state() {
        let state = state();
        assert_eq!(state.phase(), SessionPhase::Idle);
        assert_eq!(state.format(), Format::Journal);
        assert!(state.output().is_empty());
        assert!(state.failure_message().is_none());
    }

    #[test]
    fn test_set_format_clears_output() {
        let mut state = state();
        let generation = state.begin_submission();
        state.apply_outcome(generation, Ok("some output".to_string()));
        assert_eq!(state.phase(), SessionPhase::Populated);

        state.set_format(Format::Csv);
        assert_eq!(state.format(), Format::Csv);
        assert_eq!(state.phase(), SessionPhase::Idle);
        assert!(state.output().is_empty());
    }

    #[test]
    fn test_reselecting_current_format_still_clears_output() {
        let mut state = state();
        let generation = state.begin_submission();
        state.apply_outcome(generation, Ok("some output".to_string()));

        state.set_format(Format::Journal);
        assert!(state.output().is_empty());
        assert_eq!(state.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_option_panel_visible_only_for_ical() {
        let mut state = state();
        for format in Format::all() {
            state.set_format(*format);
            assert_eq!(state.shows_option_panel(), *format == Format::Ical);
        }
    }

    #[test]
    fn test_option_toggle_clears_output() {
        let mut state = state();
        let generation = state.begin_submission();
        state.apply_outcome(generation, Ok("output".to_string()));

        state.set_all_day_events(false);
        assert!(!state.all_day_events());
        assert!(state.output().is_empty());
        assert_eq!(state.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_snapshot_reflects_current_state() {
        let mut state = state();
        state.set_format(Format::Ical);

        let (format, options) = state.snapshot();
        assert_eq!(format, Format::Ical);
        assert!(options.contains(OPTION_ALL_DAY_EVENTS));

        state.set_all_day_events(false);
        let (_, options) = state.snapshot();
        assert!(!options.contains(OPTION_ALL_DAY_EVENTS));
    }

    #[test]
    fn test_settings_changes_mark_dirty() {
        let mut state = state();
        assert!(!state.settings_dirty);

        state.set_format(Format::Csv);
        assert!(state.settings_dirty);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session State Machine Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_begin_submission_enters_pending_synchronously() {
        let mut state = state();
        state.begin_submission();
        assert_eq!(state.phase(), SessionPhase::Pending);
        assert!(state.output().is_empty());
    }

    #[test]
    fn test_begin_submission_clears_previous_result() {
        let mut state = state();
        let generation = state.begin_submission();
        state.apply_outcome(generation, Ok("previous result".to_string()));

        state.begin_submission();
        assert_eq!(state.phase(), SessionPhase::Pending);
        assert!(state.output().is_empty());
    }

    #[test]
    fn test_successful_outcome_populates() {
        let mut state = state();
        let generation = state.begin_submission();

        assert!(state.apply_outcome(generation, Ok("2024-01-05 EZY123\n".to_string())));
        assert_eq!(state.phase(), SessionPhase::Populated);
        assert_eq!(state.output(), "2024-01-05 EZY123\n");
        assert!(state.failure_message().is_none());
    }

    #[test]
    fn test_failed_outcome_enters_failed_with_message() {
        let mut state = state();
        let generation = state.begin_submission();

        assert!(state.apply_outcome(generation, Err(Error::Network("offline".to_string()))));
        assert_eq!(state.phase(), SessionPhase::Failed);
        assert!(state.output().is_empty());
        assert!(state.failure_message().unwrap().contains("offline"));
    }

    #[test]
    fn test_empty_output_is_a_valid_result() {
        let mut state = state();
        let generation = state.begin_submission();

        state.apply_outcome(generation, Ok(String::new()));
        assert_eq!(state.phase(), SessionPhase::Populated);
        assert!(state.output().is_empty());
    }

    #[test]
    fn test_resubmission_after_failure() {
        let mut state = state();
        let generation = state.begin_submission();
        state.apply_outcome(generation, Err(Error::Service { status: 502 }));
        assert_eq!(state.phase(), SessionPhase::Failed);

        let generation = state.begin_submission();
        assert_eq!(state.phase(), SessionPhase::Pending);
        state.apply_outcome(generation, Ok("recovered".to_string()));
        assert_eq!(state.phase(), SessionPhase::Populated);
        assert_eq!(state.output(), "recovered");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Supersession Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_stale_outcome_is_dropped() {
        let mut state = state();
        let first = state.begin_submission();
        let second = state.begin_submission();

        // The superseded submission finishes late; its outcome must not land.
        assert!(!state.apply_outcome(first, Ok("old response".to_string())));
        assert_eq!(state.phase(), SessionPhase::Pending);
        assert!(state.output().is_empty());

        assert!(state.apply_outcome(second, Ok("new response".to_string())));
        assert_eq!(state.output(), "new response");
    }

    #[test]
    fn test_overlapping_submissions_last_wins_regardless_of_arrival_order() {
        let mut state = state();
        let first = state.begin_submission();
        let second = state.begin_submission();

        // Responses arrive out of order: newest first, stale second.
        assert!(state.apply_outcome(second, Ok("new".to_string())));
        assert!(!state.apply_outcome(first, Ok("old".to_string())));
        assert_eq!(state.phase(), SessionPhase::Populated);
        assert_eq!(state.output(), "new");
    }

    #[test]
    fn test_format_change_cancels_in_flight_submission() {
        let mut state = state();
        let generation = state.begin_submission();

        state.set_format(Format::Ical);
        assert_eq!(state.phase(), SessionPhase::Idle);

        assert!(!state.apply_outcome(generation, Ok("late response".to_string())));
        assert_eq!(state.phase(), SessionPhase::Idle);
        assert!(state.output().is_empty());
    }

    #[test]
    fn test_option_change_cancels_in_flight_submission() {
        let mut state = state();
        let generation = state.begin_submission();

        state.set_all_day_events(false);
        assert!(!state.apply_outcome(generation, Err(Error::Network("x".to_string()))));
        assert_eq!(state.phase(), SessionPhase::Idle);
        assert!(state.failure_message().is_none());
    }

    #[test]
    fn test_stale_failure_does_not_disturb_populated_session() {
        let mut state = state();
        let first = state.begin_submission();
        let second = state.begin_submission();

        state.apply_outcome(second, Ok("good".to_string()));
        assert!(!state.apply_outcome(first, Err(Error::Network("late".to_string()))));
        assert_eq!(state.phase(), SessionPhase::Populated);
        assert_eq!(state.output(), "good");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UI State Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_toggle_about() {
        let mut state = state();
        assert!(!state.ui.show_about);
        state.toggle_about();
        assert!(state.ui.show_about);
        state.toggle_about();
        assert!(!state.ui.show_about);
    }

    #[test]
    fn test_toast_expires() {
        let mut state = state();
        state.show_toast("Copied to clipboard", 10.0, 2.0);
        assert!(state.ui.toast_message.is_some());

        state.update_toast(11.0);
        assert!(state.ui.toast_message.is_some());

        state.update_toast(12.5);
        assert!(state.ui.toast_message.is_none());
        assert!(state.ui.toast_expires_at.is_none());
    }
}
