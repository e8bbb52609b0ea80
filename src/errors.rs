//! Custom error types for clean-ip.
//!
//! This module provides user-friendly error types that wrap underlying
//! errors with clear, actionable messages.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;

/// Exit codes for the application.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// The measurement input could not be read or parsed.
    pub const INPUT_ERROR: i32 = 1;
    /// The export destination could not be created.
    pub const EXPORT_ERROR: i32 = 2;
    /// Configuration error (invalid arguments).
    pub const CONFIG_ERROR: i32 = 3;
}

/// Categories of errors that can occur while ranking addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading or decoding the measurement records.
    Input,
    /// Creating the export destination.
    Export,
    /// Invalid configuration or arguments.
    Config,
}

impl ErrorKind {
    /// Get the exit code for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorKind::Input => exit_codes::INPUT_ERROR,
            ErrorKind::Export => exit_codes::EXPORT_ERROR,
            ErrorKind::Config => exit_codes::CONFIG_ERROR,
        }
    }

    /// Get a user-friendly description of this error kind.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::Input => "Input error",
            ErrorKind::Export => "Export error",
            ErrorKind::Config => "Configuration error",
        }
    }
}

/// A user-friendly error type for clean-ip operations.
#[derive(Debug)]
pub struct CleanIpError {
    /// The kind of error.
    pub kind: ErrorKind,
    /// User-friendly error message.
    pub message: String,
    /// Optional suggestion for how to resolve the error.
    pub suggestion: Option<String>,
    /// The underlying error, if any.
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CleanIpError {
    /// Create a new CleanIpError.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), suggestion: None, source: None }
    }

    /// Add a suggestion for how to resolve the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add the underlying error source.
    pub fn with_source(
        mut self,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        self.kind.exit_code()
    }

    /// Create an input error.
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Input, message).with_suggestion(
            "The input must be a JSON array of measurement records.",
        )
    }

    /// Create an export error.
    pub fn export(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Export, message)
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }
}

impl fmt::Display for CleanIpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.description(), self.message)?;

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }

        Ok(())
    }
}

impl Error for CleanIpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

/// Build the error reported when the export destination cannot be created.
///
/// The suggestion depends on why the filesystem refused the file.
pub fn export_error(path: &Path, error: io::Error) -> CleanIpError {
    let message =
        format!("failed to create file [{}]: {}", path.display(), error);

    let export_error = match error.kind() {
        io::ErrorKind::PermissionDenied => CleanIpError::export(message)
            .with_suggestion("Check the write permissions of the destination."),
        io::ErrorKind::NotFound => CleanIpError::export(message)
            .with_suggestion("Make sure the parent directory exists."),
        _ => CleanIpError::export(message).with_suggestion(
            "Pass -o with a different path, or -o \"\" to skip the file.",
        ),
    };

    export_error.with_source(error)
}

/// Format an error for user display.
///
/// This function creates a user-friendly error message that includes
/// the error message and any available suggestions.
pub fn format_error_for_display(error: &CleanIpError) -> String {
    let mut output = format!("Error: {}", error.message);

    if let Some(ref suggestion) = error.suggestion {
        output.push_str(&format!("\n\nSuggestion: {}", suggestion));
    }

    output
}
