//! CLI-specific error types
//!
//! Errors raised by the library keep their own codes; the CLI only adds
//! codes for its own I/O and argument failures.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::schema::SchemaError;
use crate::session::SessionError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// I/O error (stdin/stdout/files)
    IoError,
    /// Input that is not the expected JSON
    InvalidInput,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::IoError => "FORM_CLI_IO_ERROR",
            Self::InvalidInput => "FORM_CLI_INVALID_INPUT",
        }
    }
}

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}: {message}", .code.code())]
    Cli { code: CliErrorCode, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        CliError::Cli {
            code,
            message: message.into(),
        }
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Malformed input
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Cli { code, .. } => code.code(),
            CliError::Config(e) => e.code(),
            CliError::Schema(e) => e.code(),
            CliError::Session(e) => e.code(),
        }
    }

    /// Get the error message without the code prefix
    pub fn message(&self) -> String {
        match self {
            CliError::Cli { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::invalid_input(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
