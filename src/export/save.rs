//! Saving converted output to a file
//!
//! Output leaves the app byte-exact except for line endings: iCalendar
//! and Excel-dialect CSV consumers expect CRLF, while the flight journal
//! stays LF. Normalization happens at the export boundary so the output
//! buffer itself always holds what the service sent.

use crate::convert::Format;
use crate::error::{Error, Result};
use log::info;
use std::fs;
use std::path::Path;

/// Apply the format's line-ending convention to output text.
///
/// Idempotent: already-CRLF text is not doubled up.
pub fn normalize_line_endings(text: &str, format: Format) -> String {
    if format.uses_crlf() {
        text.replace("\r\n", "\n").replace('\n', "\r\n")
    } else {
        text.to_string()
    }
}

/// Write output text to `path` with the format's line endings.
///
/// Empty output writes an empty file; that is a valid export, not an
/// error.
pub fn save_output(path: &Path, format: Format, text: &str) -> Result<()> {
    let normalized = normalize_line_endings(text, format);
    fs::write(path, normalized).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Saved {} output to {}", format.wire_name(), path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
