//! Configuration file persistence for Rosterly
//!
//! This module handles loading and saving the configuration file to
//! platform-specific directories with robust error handling and
//! graceful fallback to defaults.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "rosterly";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Backup configuration file name (used during atomic writes)
const CONFIG_BACKUP_NAME: &str = "config.json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// - **Windows**: `%APPDATA%\rosterly\`
/// - **macOS**: `~/Library/Application Support/rosterly/`
/// - **Linux**: `~/.config/rosterly/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be
/// determined (e.g., if the HOME environment variable is not set).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the configuration file.
pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Ensure the configuration directory exists, creating it if necessary.
fn ensure_config_dir() -> Result<PathBuf> {
    let config_dir = get_config_dir()?;

    if !config_dir.exists() {
        debug!("Creating config directory: {}", config_dir.display());
        fs::create_dir_all(&config_dir).map_err(|e| Error::ConfigSave {
            path: config_dir.clone(),
            source: Box::new(e),
        })?;
    }

    Ok(config_dir)
}

// ─────────────────────────────────────────────────────────────────────────────
// Load Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Load configuration from the default config file location.
///
/// # Behavior
///
/// 1. If the config file exists and is valid JSON, load and sanitize it
/// 2. If the config file doesn't exist, return default settings
/// 3. If the config file is corrupted/invalid, log a warning and return defaults
pub fn load_config() -> Settings {
    load_config_internal()
        .unwrap_or_warn_default(Settings::default(), "Failed to load configuration")
}

/// Internal implementation of config loading.
fn load_config_internal() -> Result<Settings> {
    let config_path = get_config_file_path()?;

    // Check if config file exists
    if !config_path.exists() {
        debug!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        return Ok(Settings::default());
    }

    debug!("Loading config from: {}", config_path.display());

    // Read the file contents
    let contents = fs::read_to_string(&config_path).map_err(|e| Error::ConfigLoad {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    // Handle empty file
    if contents.trim().is_empty() {
        debug!("Config file is empty, using defaults");
        return Ok(Settings::default());
    }

    // Parse and sanitize
    let settings = Settings::from_json_sanitized(&contents).map_err(|e| {
        warn!(
            "Config file at {} contains invalid JSON: {}",
            config_path.display(),
            e
        );
        Error::ConfigParse {
            message: format!("Failed to parse config file: {}", e),
            source: Some(Box::new(e)),
        }
    })?;

    info!(
        "Configuration loaded successfully from {}",
        config_path.display()
    );
    Ok(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Save Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Save configuration to the default config file location.
///
/// This function performs an atomic write by:
/// 1. Writing to a temporary backup file
/// 2. Replacing the original file with the backup
///
/// # Errors
///
/// - `Error::ConfigDirNotFound`: Config directory cannot be determined
/// - `Error::ConfigSave`: Failed to write the config file
pub fn save_config(settings: &Settings) -> Result<()> {
    let config_dir = ensure_config_dir()?;
    let config_path = config_dir.join(CONFIG_FILE_NAME);
    let backup_path = config_dir.join(CONFIG_BACKUP_NAME);

    debug!("Saving config to: {}", config_path.display());

    // Serialize to pretty JSON
    let json = serde_json::to_string_pretty(settings).map_err(|e| Error::ConfigSave {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    // Write to backup file first (atomic write pattern)
    fs::write(&backup_path, &json).map_err(|e| Error::ConfigSave {
        path: backup_path.clone(),
        source: Box::new(e),
    })?;

    // Replace original with backup
    fs::rename(&backup_path, &config_path).map_err(|e| Error::ConfigSave {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    info!(
        "Configuration saved successfully to {}",
        config_path.display()
    );
    Ok(())
}

/// Save configuration, ignoring errors.
///
/// This is useful for "best effort" saves where failure shouldn't
/// interrupt the application flow (e.g., saving on exit).
///
/// # Returns
///
/// Returns `true` if the save was successful, `false` otherwise.
pub fn save_config_silent(settings: &Settings) -> bool {
    match save_config(settings) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to save configuration: {}", e);
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
