//! User settings and preferences for Rosterly
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence.

use crate::convert::{Format, DEFAULT_ENDPOINT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Window Geometry
// ─────────────────────────────────────────────────────────────────────────────

/// Saved window size and position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Window X position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Window Y position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// All persisted user preferences.
///
/// Loaded once at startup and saved on exit (or when marked dirty).
/// Unknown/missing fields fall back to defaults so old config files keep
/// working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────
    /// Output format selected when the app was last closed
    pub format: Format,

    /// Whether iCalendar output includes all-day events
    pub all_day_events: bool,

    /// Conversion service URL
    pub endpoint: String,

    // ─────────────────────────────────────────────────────────────────────────
    // Dialog Directories
    // ─────────────────────────────────────────────────────────────────────────
    /// Last directory a roster was opened from
    pub last_roster_directory: Option<PathBuf>,

    /// Last directory journal output was saved to
    pub journal_save_directory: Option<PathBuf>,

    /// Last directory CSV output was saved to
    pub csv_save_directory: Option<PathBuf>,

    /// Last directory iCalendar output was saved to
    pub ical_save_directory: Option<PathBuf>,

    // ─────────────────────────────────────────────────────────────────────────
    // Window State
    // ─────────────────────────────────────────────────────────────────────────
    /// Window size and position
    pub window_size: WindowSize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Conversion
            format: Format::default(),
            all_day_events: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),

            // Dialog Directories
            last_roster_directory: None,
            journal_save_directory: None,
            csv_save_directory: None,
            ical_save_directory: None,

            // Window State
            window_size: WindowSize::default(),
        }
    }
}

impl Settings {
    /// Remembered save directory for a format.
    pub fn save_directory(&self, format: Format) -> Option<&PathBuf> {
        match format {
            Format::Journal => self.journal_save_directory.as_ref(),
            Format::Csv => self.csv_save_directory.as_ref(),
            Format::Ical => self.ical_save_directory.as_ref(),
        }
    }

    /// Remember the save directory for a format.
    pub fn set_save_directory(&mut self, format: Format, dir: PathBuf) {
        match format {
            Format::Journal => self.journal_save_directory = Some(dir),
            Format::Csv => self.csv_save_directory = Some(dir),
            Format::Ical => self.ical_save_directory = Some(dir),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 200.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        // Clamp window size
        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        // An empty endpoint would make every submission fail opaquely
        if self.endpoint.trim().is_empty() {
            self.endpoint = DEFAULT_ENDPOINT.to_string();
        }
    }

    /// Parse settings from JSON and sanitize the result.
    pub fn from_json_sanitized(json: &str) -> serde_json::Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.format, Format::Journal);
        assert!(settings.all_day_events);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert!(settings.last_roster_directory.is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut settings = Settings::default();
        settings.format = Format::Ical;
        settings.all_day_events = false;
        settings.last_roster_directory = Some(PathBuf::from("/rosters"));
        settings.window_size.width = 1024.0;

        let json = serde_json::to_string_pretty(&settings).unwrap();
        let restored: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, settings);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str("{\"format\": \"csv\"}").unwrap();
        assert_eq!(settings.format, Format::Csv);
        assert!(settings.all_day_events);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_sanitize_clamps_window_size() {
        let mut settings = Settings::default();
        settings.window_size.width = 10.0;
        settings.window_size.height = 99999.0;
        settings.sanitize();
        assert_eq!(settings.window_size.width, Settings::MIN_WINDOW_SIZE);
        assert_eq!(settings.window_size.height, Settings::MAX_WINDOW_SIZE);
    }

    #[test]
    fn test_sanitize_restores_empty_endpoint() {
        let mut settings = Settings::default();
        settings.endpoint = "   ".to_string();
        settings.sanitize();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_from_json_sanitized() {
        let json = "{\"endpoint\": \"\", \"window_size\": {\"width\": 1.0, \"height\": 500.0}}";
        let settings = Settings::from_json_sanitized(json).unwrap();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.window_size.width, Settings::MIN_WINDOW_SIZE);
        assert_eq!(settings.window_size.height, 500.0);
    }

    #[test]
    fn test_save_directory_per_format() {
        let mut settings = Settings::default();
        assert!(settings.save_directory(Format::Csv).is_none());

        settings.set_save_directory(Format::Csv, PathBuf::from("/logbooks"));
        settings.set_save_directory(Format::Ical, PathBuf::from("/calendars"));

        assert_eq!(
            settings.save_directory(Format::Csv),
            Some(&PathBuf::from("/logbooks"))
        );
        assert_eq!(
            settings.save_directory(Format::Ical),
            Some(&PathBuf::from("/calendars"))
        );
        assert!(settings.save_directory(Format::Journal).is_none());
    }
}
