//! Native file dialog integration using the rfd crate
//!
//! This module provides functions to open native file picker dialogs
//! for choosing a roster file and for saving converted output.

use crate::convert::Format;
use rfd::FileDialog;
use std::path::PathBuf;

/// File extension filters for AIMS roster reports.
const ROSTER_EXTENSIONS: &[&str] = &["htm", "html"];

/// Opens a native file dialog for selecting a single roster file.
///
/// Returns `Some(PathBuf)` if a file was selected, `None` if cancelled.
/// Every completed pick returns a path, so selecting the same file twice
/// in a row triggers a fresh conversion each time.
pub fn open_roster_dialog(initial_dir: Option<&PathBuf>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Load Roster")
        .add_filter("AIMS Roster", ROSTER_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.pick_file()
}

/// Opens a native save dialog for the given output format.
///
/// The suggested file name and the extension filters follow the format;
/// returns `Some(PathBuf)` if a location was selected, `None` if
/// cancelled.
pub fn save_output_dialog(format: Format, initial_dir: Option<&PathBuf>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new().set_title("Save Output");

    dialog = match format {
        Format::Journal => dialog.add_filter("Text file", &["txt"]),
        Format::Csv => dialog.add_filter("CSV file", &["csv"]),
        Format::Ical => dialog.add_filter("ICAL file", &["ics", "ical"]),
    };
    dialog = dialog
        .add_filter("All Files", &["*"])
        .set_file_name(format.export_file_name());

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file()
}
