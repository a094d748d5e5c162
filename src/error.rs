//! Error types for nginx-3scale.
//!
//! Uses thiserror for derive macros. Every variant is terminal: the run
//! stops at the first error and nginx is never started.

use crate::exit_codes;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the render-and-exec pipeline.
#[derive(Error, Debug)]
pub enum WrapperError {
    /// The command line could not be parsed.
    #[error("invalid command line: {message}")]
    Parse { message: String },

    /// A value failed its field pattern. Only the first failing field is reported.
    #[error("invalid value '{value}' for '--{flag}': must match {pattern}")]
    Validation {
        flag: String,
        value: String,
        pattern: String,
    },

    /// A registry pattern is not a valid regular expression.
    #[error("field '--{flag}' declares an invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        flag: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Reading a template or writing a rendered file failed.
    #[error("failed to {action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Replacing this process with nginx failed.
    #[error("failed to execute '{}': {source}", program.display())]
    Exec {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WrapperError {
    /// Shorthand for building an `Io` variant.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        WrapperError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            WrapperError::Parse { .. } => exit_codes::PARSE_FAILURE,
            WrapperError::Validation { .. } => exit_codes::VALIDATION_FAILURE,
            WrapperError::InvalidPattern { .. } => exit_codes::REGISTRY_DEFECT,
            WrapperError::Io { .. } => exit_codes::IO_FAILURE,
            WrapperError::Exec { .. } => exit_codes::EXEC_FAILURE,
        }
    }
}

/// Result type alias for nginx-3scale operations.
pub type Result<T> = std::result::Result<T, WrapperError>;
