//! Centralized error handling for Rosterly
//!
//! This module provides a unified error type that covers all error scenarios
//! in the application: file I/O, the remote conversion service, clipboard
//! access, and configuration.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the application.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the application.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // File I/O Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to read the roster file
    FileRead { path: PathBuf, source: io::Error },

    /// Failed to write exported output
    FileWrite { path: PathBuf, source: io::Error },

    // ─────────────────────────────────────────────────────────────────────────
    // Conversion Service Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// The request never completed (offline, DNS, timeout, TLS)
    Network(String),

    /// The service answered with a non-success status code
    Service { status: u16 },

    /// The service answered 2xx but the body was not a JSON-encoded string
    MalformedResponse(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Export Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Clipboard access or write failed
    Clipboard(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to load configuration file
    ConfigLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to save configuration file
    ConfigSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse configuration (invalid JSON/format)
    ConfigParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration directory not found or inaccessible
    ConfigDirNotFound,
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // File I/O Errors
            Error::FileRead { path, source } => {
                write!(f, "Failed to read '{}': {}", path.display(), source)
            }
            Error::FileWrite { path, source } => {
                write!(f, "Failed to write '{}': {}", path.display(), source)
            }

            // Conversion Service Errors
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Service { status } => {
                write!(f, "Conversion service returned status {}", status)
            }
            Error::MalformedResponse(msg) => {
                write!(f, "Unexpected response from conversion service: {}", msg)
            }

            // Export Errors
            Error::Clipboard(msg) => write!(f, "Clipboard error: {}", msg),

            // Configuration Errors
            Error::ConfigLoad { path, source } => {
                write!(
                    f,
                    "Failed to load configuration from '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigSave { path, source } => {
                write!(
                    f,
                    "Failed to save configuration to '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigParse { message, .. } => {
                write!(f, "Invalid configuration format: {}", message)
            }
            Error::ConfigDirNotFound => {
                write!(f, "Configuration directory not found")
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FileRead { source, .. } | Error::FileWrite { source, .. } => Some(source),
            Error::ConfigLoad { source, .. } => Some(source.as_ref()),
            Error::ConfigSave { source, .. } => Some(source.as_ref()),
            Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::Network(_)
            | Error::Service { .. }
            | Error::MalformedResponse(_)
            | Error::Clipboard(_)
            | Error::ConfigDirNotFound => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_read_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = Error::FileRead {
            path: PathBuf::from("/rosters/jan.htm"),
            source: io_err,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("/rosters/jan.htm"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_network_error_display() {
        let err = Error::Network("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_service_error_display() {
        let err = Error::Service { status: 502 };
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_clipboard_error_display() {
        let err = Error::Clipboard("permission denied".to_string());
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_display_config_dir_not_found() {
        let err = Error::ConfigDirNotFound;
        assert_eq!(format!("{}", err), "Configuration directory not found");
    }

    #[test]
    fn test_error_source_file_read() {
        use std::error::Error as StdError;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
        let err = Error::FileRead {
            path: PathBuf::from("x"),
            source: io_err,
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source_none_for_simple_variants() {
        use std::error::Error as StdError;
        assert!(Error::Network("x".to_string()).source().is_none());
        assert!(Error::Service { status: 500 }.source().is_none());
        assert!(Error::ConfigDirNotFound.source().is_none());
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> super::Result<i32> {
            Ok(42)
        }

        fn returns_err() -> super::Result<i32> {
            Err(Error::Network("unreachable".to_string()))
        }

        assert_eq!(returns_ok().unwrap(), 42);
        assert!(returns_err().is_err());
    }

    #[test]
    fn test_unwrap_or_warn_default_ok() {
        use super::ResultExt;
        let result: super::Result<i32> = Ok(42);
        assert_eq!(result.unwrap_or_warn_default(0, "test context"), 42);
    }

    #[test]
    fn test_unwrap_or_warn_default_err() {
        use super::ResultExt;
        let result: super::Result<i32> = Err(Error::Network("unreachable".to_string()));
        assert_eq!(result.unwrap_or_warn_default(0, "test context"), 0);
    }
}
