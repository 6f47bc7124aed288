//! Field validator over canonical schemas
//!
//! Validation semantics:
//! - Required pass first: a missing, null or blank required value gets
//!   "<title> is required" and no further checks
//! - Rule pass second, for declared properties holding anything other than
//!   null or ""
//! - Rules run in a fixed order and a later violation replaces an earlier
//!   one, so each field carries at most one message
//! - Values for undeclared keys are ignored
//!
//! Pattern constraints are compiled when the validator is built. A pattern
//! that does not compile is a schema defect and fails there; validating
//! values never fails.

use std::collections::{BTreeMap, HashMap};

use regex::Regex;
use serde_json::{Map, Value};

use crate::schema::{CanonicalField, CanonicalSchema, SchemaError, SchemaResult};

use super::format::Format;
use super::messages;

/// A bag of field values keyed by field name.
pub type FieldValues = Map<String, Value>;

/// Field name to error message. Empty means valid.
pub type FieldErrors = BTreeMap<String, String>;

/// A canonical schema with its patterns compiled.
///
/// Holds no mutable state; one instance can serve any number of sessions.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    schema: CanonicalSchema,
    patterns: HashMap<String, Regex>,
}

impl FieldValidator {
    /// Compiles the schema's pattern constraints.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidPattern` for the first pattern that is
    /// not a valid regular expression.
    pub fn new(schema: CanonicalSchema) -> SchemaResult<Self> {
        let mut patterns = HashMap::new();

        for (name, field) in &schema.properties {
            if let Some(pattern) = &field.pattern {
                patterns.insert(name.clone(), compile_full_match(name, pattern)?);
            }
        }

        Ok(Self { schema, patterns })
    }

    pub fn schema(&self) -> &CanonicalSchema {
        &self.schema
    }

    /// Validates `values`, returning one message per offending field.
    pub fn validate(&self, values: &FieldValues) -> FieldErrors {
        let mut errors = FieldErrors::new();

        for name in &self.schema.required {
            if is_blank(values.get(name)) {
                errors.insert(name.clone(), messages::required(self.schema.title_of(name)));
            }
        }

        for (name, value) in values {
            if errors.contains_key(name) || is_empty(value) {
                continue;
            }
            let Some(field) = self.schema.properties.get(name) else {
                continue;
            };
            if let Some(message) = self.check_rules(name, field, value) {
                errors.insert(name.clone(), message);
            }
        }

        errors
    }

    /// Runs the rule checks for one filled value. The last violation wins.
    fn check_rules(&self, name: &str, field: &CanonicalField, value: &Value) -> Option<String> {
        let title = field.title.as_deref().unwrap_or(name);
        let mut violation = None;

        if let Some(text) = value.as_str() {
            let length = text.chars().count() as u64;
            if let Some(min) = field.min_length {
                if length < min {
                    violation = Some(messages::too_short(title, min));
                }
            }
            if let Some(max) = field.max_length {
                if length > max {
                    violation = Some(messages::too_long(title, max));
                }
            }
        }

        if let Some(number) = value.as_f64() {
            if let Some(minimum) = field.minimum {
                if number < minimum {
                    violation = Some(messages::below_minimum(title, minimum));
                }
            }
            if let Some(maximum) = field.maximum {
                if number > maximum {
                    violation = Some(messages::above_maximum(title, maximum));
                }
            }
        }

        if let (Some(regex), Some(text)) = (self.patterns.get(name), value.as_str()) {
            if !regex.is_match(text) {
                violation = Some(messages::pattern_mismatch(title));
            }
        }

        if let Some(allowed) = &field.enum_values {
            if !allowed.contains(value) {
                violation = Some(messages::not_in_enum(title));
            }
        }

        let format = field.format.as_deref().and_then(Format::parse);
        if let (Some(format), Some(text)) = (format, value.as_str()) {
            if !format.matches(text) {
                violation = Some(match format {
                    Format::Email => messages::invalid_email(title),
                    Format::Date => messages::invalid_date(title),
                    Format::Url => messages::invalid_url(title),
                });
            }
        }

        violation
    }
}

/// Compiles and validates `schema` against `values` in one call.
pub fn validate(schema: &CanonicalSchema, values: &FieldValues) -> SchemaResult<FieldErrors> {
    Ok(FieldValidator::new(schema.clone())?.validate(values))
}

/// Missing, null, or a string that is empty after trimming.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Null or the empty string. Whitespace still counts as a value here.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Compiles `pattern` so it must match the whole value.
fn compile_full_match(field: &str, pattern: &str) -> SchemaResult<Regex> {
    let invalid = |e: regex::Error| SchemaError::InvalidPattern {
        field: field.to_string(),
        reason: e.to_string(),
    };

    // Check the pattern on its own first: wrapping can turn an unbalanced
    // pattern like `a)|(b` into a valid one.
    Regex::new(pattern).map_err(invalid)?;
    Regex::new(&format!("^(?:{})$", pattern)).map_err(invalid)
}
