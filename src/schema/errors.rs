//! Schema error types
//!
//! Every error here is a schema-authoring defect, never a user-input problem.
//! They surface when a form definition is loaded or a validator is compiled,
//! before any session starts.
//!
//! Error codes:
//! - FORM_SCHEMA_MALFORMED
//! - FORM_SCHEMA_NO_STEPS
//! - FORM_SCHEMA_UNKNOWN_REQUIRED
//! - FORM_SCHEMA_INVALID_PATTERN
//! - FORM_SCHEMA_DIALECT_MISMATCH
//! - FORM_SCHEMA_STEP_OUT_OF_RANGE
//! - FORM_SCHEMA_IO

use thiserror::Error;

use super::types::SchemaKind;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema-authoring errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Malformed schema '{source_name}': {reason}")]
    Malformed { source_name: String, reason: String },

    #[error("Multi-step schema declares no steps")]
    NoSteps,

    #[error("Required field '{field}' is not declared in properties{}", step_suffix(.step))]
    UnknownRequiredField { field: String, step: Option<usize> },

    #[error("Invalid pattern for field '{field}': {reason}")]
    InvalidPattern { field: String, reason: String },

    #[error("Form declares isMultiStep={declared} but its schema is the {detected} dialect")]
    DialectMismatch { declared: bool, detected: SchemaKind },

    #[error("Step {index} out of range (form has {count} steps)")]
    StepOutOfRange { index: usize, count: usize },

    #[error("Failed to read '{path}': {reason}")]
    Io { path: String, reason: String },
}

fn step_suffix(step: &Option<usize>) -> String {
    match step {
        Some(index) => format!(" (step {})", index),
        None => String::new(),
    }
}

impl SchemaError {
    /// Create a malformed-schema error
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::Malformed {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::Malformed { .. } => "FORM_SCHEMA_MALFORMED",
            SchemaError::NoSteps => "FORM_SCHEMA_NO_STEPS",
            SchemaError::UnknownRequiredField { .. } => "FORM_SCHEMA_UNKNOWN_REQUIRED",
            SchemaError::InvalidPattern { .. } => "FORM_SCHEMA_INVALID_PATTERN",
            SchemaError::DialectMismatch { .. } => "FORM_SCHEMA_DIALECT_MISMATCH",
            SchemaError::StepOutOfRange { .. } => "FORM_SCHEMA_STEP_OUT_OF_RANGE",
            SchemaError::Io { .. } => "FORM_SCHEMA_IO",
        }
    }
}
