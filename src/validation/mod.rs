//! Field validation against canonical schemas
//!
//! User-input problems are never errors here: they come back as a
//! field-name-to-message map. Only schema defects (bad patterns) fail.

mod format;
mod messages;
mod validator;

pub use format::Format;
pub use validator::{validate, FieldErrors, FieldValidator, FieldValues};
