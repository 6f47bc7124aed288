//! formwizard - JSON-schema driven form engine
//!
//! Turns a stored form definition into a validated, optionally multi-step
//! fill session:
//!
//! - `schema`: parse both authoring dialects and normalize them
//! - `validation`: compile and run field validators
//! - `session`: step orchestration and the session state machine
//! - `result`: aggregate submitted values with their schema metadata
//! - `render`: the boundary with an external render adapter

pub mod cli;
pub mod config;
pub mod observability;
pub mod render;
pub mod result;
pub mod schema;
pub mod session;
pub mod validation;

pub use config::FormConfig;
pub use result::{aggregate, FormResult};
pub use schema::{FormDefinition, RawSchema, SchemaError, SchemaLoader};
pub use session::{create_form, FormEvent, FormSession, SessionError};
pub use validation::{validate, FieldErrors, FieldValidator, FieldValues};
