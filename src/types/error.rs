//! Error types for the sales analytics pipeline
//!
//! This module defines the operational failures of a run. Data-quality
//! problems in individual records are not errors; see [`crate::types::outcome`].
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **Read Errors**: The delimited reader could not produce a record
//! - **Catalog Errors**: The product catalog file is unreadable or malformed
//! - **Configuration Errors**: Contradictory command-line options
//! - **Output Errors**: The report or enriched records could not be written

use thiserror::Error;

/// Main error type for the sales analytics pipeline
///
/// Each variant is fatal for the current run and carries enough context to
/// be printed directly by the CLI.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// The delimited reader failed below the record level
    #[error("Read error{}: {message}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The product catalog could not be loaded
    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    /// Command-line options contradict each other
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The async runtime or one of its tasks failed
    #[error("Runtime error: {message}")]
    RuntimeError { message: String },

    /// A report or enriched record could not be written
    #[error("Output error: {message}")]
    OutputError { message: String },
}

// Conversion from io::Error to AnalyticsError
impl From<std::io::Error> for AnalyticsError {
    fn from(error: std::io::Error) -> Self {
        AnalyticsError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to AnalyticsError
impl From<csv::Error> for AnalyticsError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        AnalyticsError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(error: serde_json::Error) -> Self {
        AnalyticsError::CatalogError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl AnalyticsError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &std::path::Path) -> Self {
        AnalyticsError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create an error for a file that exists but could not be opened
    ///
    /// Maps `NotFound` to [`AnalyticsError::FileNotFound`] so the CLI can
    /// report missing inputs distinctly.
    pub fn open_failed(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::file_not_found(path)
        } else {
            AnalyticsError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), error),
            }
        }
    }

    /// Create a CatalogError
    pub fn catalog(message: impl Into<String>) -> Self {
        AnalyticsError::CatalogError {
            message: message.into(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        AnalyticsError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a RuntimeError
    pub fn runtime(message: impl Into<String>) -> Self {
        AnalyticsError::RuntimeError {
            message: message.into(),
        }
    }

    /// Create an OutputError
    pub fn output(message: impl Into<String>) -> Self {
        AnalyticsError::OutputError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case::file_not_found(
        AnalyticsError::FileNotFound { path: "sales.txt".to_string() },
        "File not found: sales.txt"
    )]
    #[case::io_error(
        AnalyticsError::IoError { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::parse_error_with_line(
        AnalyticsError::ParseError { line: Some(42), message: "bad byte".to_string() },
        "Read error at line 42: bad byte"
    )]
    #[case::parse_error_without_line(
        AnalyticsError::ParseError { line: None, message: "bad byte".to_string() },
        "Read error: bad byte"
    )]
    #[case::catalog(
        AnalyticsError::CatalogError { message: "missing field `id`".to_string() },
        "Catalog error: missing field `id`"
    )]
    #[case::invalid_config(
        AnalyticsError::InvalidConfig { message: "min-amount exceeds max-amount".to_string() },
        "Invalid configuration: min-amount exceeds max-amount"
    )]
    #[case::runtime(
        AnalyticsError::RuntimeError { message: "task panicked".to_string() },
        "Runtime error: task panicked"
    )]
    #[case::output(
        AnalyticsError::OutputError { message: "disk full".to_string() },
        "Output error: disk full"
    )]
    fn test_error_display(#[case] error: AnalyticsError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::catalog(
        AnalyticsError::catalog("bad"),
        AnalyticsError::CatalogError { message: "bad".to_string() }
    )]
    #[case::invalid_config(
        AnalyticsError::invalid_config("bad"),
        AnalyticsError::InvalidConfig { message: "bad".to_string() }
    )]
    #[case::runtime(
        AnalyticsError::runtime("bad"),
        AnalyticsError::RuntimeError { message: "bad".to_string() }
    )]
    #[case::output(
        AnalyticsError::output("bad"),
        AnalyticsError::OutputError { message: "bad".to_string() }
    )]
    fn test_helper_functions(#[case] result: AnalyticsError, #[case] expected: AnalyticsError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_open_failed_maps_not_found() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = AnalyticsError::open_failed(Path::new("sales.txt"), io_error);
        assert_eq!(
            error,
            AnalyticsError::FileNotFound {
                path: "sales.txt".to_string()
            }
        );
    }

    #[test]
    fn test_open_failed_keeps_other_kinds() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = AnalyticsError::open_failed(Path::new("sales.txt"), io_error);
        assert!(matches!(error, AnalyticsError::IoError { .. }));
        assert!(error.to_string().contains("Failed to open file 'sales.txt'"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: AnalyticsError = io_error.into();
        assert!(matches!(error, AnalyticsError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: AnalyticsError = json_error.into();
        assert!(matches!(error, AnalyticsError::CatalogError { .. }));
    }
}
