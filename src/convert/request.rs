//! Request data model for the remote conversion service
//!
//! This module defines the output format selector, the option-flag set,
//! and the JSON request body posted to the conversion endpoint.

// Allow dead code - OptionSet provides the complete set API even though
// only membership and insertion are exercised by the single flag today
#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ─────────────────────────────────────────────────────────────────────────────
// Output Format
// ─────────────────────────────────────────────────────────────────────────────

/// Output formats the conversion service can produce.
///
/// Exactly one format is selected at any time (radio semantics in the UI).
/// The serialized names are the service's wire names, which predate this
/// application and cannot change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Format {
    /// Plain-text electronic flight journal
    #[default]
    #[serde(rename = "efj")]
    Journal,
    /// iCalendar roster (.ics)
    #[serde(rename = "ical")]
    Ical,
    /// Logbook CSV
    #[serde(rename = "csv")]
    Csv,
}

impl Format {
    /// All formats, in the order they appear in the format selector.
    pub fn all() -> &'static [Format] {
        &[Format::Journal, Format::Csv, Format::Ical]
    }

    /// The service's wire name for this format.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Format::Journal => "efj",
            Format::Ical => "ical",
            Format::Csv => "csv",
        }
    }

    /// Label shown next to the radio button.
    pub fn label(&self) -> &'static str {
        match self {
            Format::Journal => "Flight Journal",
            Format::Ical => "Roster (.ics)",
            Format::Csv => "Logbook (.csv)",
        }
    }

    /// Default file name offered when saving output in this format.
    pub fn export_file_name(&self) -> &'static str {
        match self {
            Format::Journal => "journal.txt",
            Format::Ical => "roster.ics",
            Format::Csv => "roster.csv",
        }
    }

    /// Whether exported/copied output uses DOS line endings.
    ///
    /// iCalendar requires CRLF, and the CSV output targets the Excel
    /// dialect which expects it too. The journal format stays LF.
    pub fn uses_crlf(&self) -> bool {
        matches!(self, Format::Ical | Format::Csv)
    }

    /// Whether this format has an auxiliary option panel.
    pub fn has_options(&self) -> bool {
        matches!(self, Format::Ical)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Option Flags
// ─────────────────────────────────────────────────────────────────────────────

/// Wire name of the "All Day Events" flag (iCalendar output only).
pub const OPTION_ALL_DAY_EVENTS: &str = "ade";

/// A set of independent boolean option flags, identified by wire name.
///
/// Only membership matters; the set serializes to a JSON array of the
/// member names. There is currently one known flag
/// ([`OPTION_ALL_DAY_EVENTS`]) but the contract supports any number.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(BTreeSet<String>);

impl OptionSet {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove a flag by name.
    pub fn set(&mut self, name: &str, enabled: bool) {
        if enabled {
            self.0.insert(name.to_string());
        } else {
            self.0.remove(name);
        }
    }

    /// Check whether a flag is a member.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Number of flags currently set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no flags are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion Request
// ─────────────────────────────────────────────────────────────────────────────

/// The JSON body posted to the conversion endpoint.
///
/// Built fresh for every submission from the roster text and the
/// format/option snapshot taken at submission time; never mutated after.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionRequest {
    pub roster: String,
    pub format: Format,
    pub options: OptionSet,
}

impl ConversionRequest {
    pub fn new(roster: String, format: Format, options: OptionSet) -> Self {
        Self {
            roster,
            format,
            options,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
