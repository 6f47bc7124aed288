//! Form schema subsystem
//!
//! Raw form schemas come in two authoring dialects. This module parses them,
//! fixes the dialect once at load time, and normalizes every page into the
//! canonical validation schema used by the field validator.
//!
//! # Design Principles
//!
//! - Dialect is an explicit discriminant, never re-inspected
//! - Normalization is pure and never defaults absent constraints
//! - Authoring defects fail at load time, not during a session

mod errors;
mod loader;
mod normalizer;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use loader::{check_definition, SchemaLoader};
pub use normalizer::{
    normalize, normalize_all, normalize_simple, normalize_step, FILE_DESCRIPTION, FILE_FORMAT,
};
pub use types::{
    CanonicalField, CanonicalSchema, FormDefinition, FormId, MultiStepSchema, RawSchema,
    SchemaKind, SimpleField, SimpleSchema, Step, StepField, StepSchema, StepValidation,
};
