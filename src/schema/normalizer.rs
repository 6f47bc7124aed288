//! Dialect normalization into the canonical validation schema
//!
//! Both functions are pure. Absent source constraints stay absent in the
//! output; nothing is defaulted.

use indexmap::IndexMap;
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::types::{CanonicalField, CanonicalSchema, RawSchema, SimpleSchema, StepSchema};

/// Format assigned to object-typed simple fields (file uploads).
pub const FILE_FORMAT: &str = "data-url";

/// Description shown on coerced file fields.
pub const FILE_DESCRIPTION: &str = "Select a file";

/// Normalizes one step of a multi-step schema.
///
/// Carries over type, label (as title), description and the two length
/// bounds. Required-ness comes from the per-field flags.
pub fn normalize_step(step: &StepSchema) -> CanonicalSchema {
    let mut properties = IndexMap::with_capacity(step.properties.len());
    let mut required = Vec::new();

    for (name, field) in &step.properties {
        let validation = field.validation.clone().unwrap_or_default();
        let canonical = CanonicalField {
            field_type: field.field_type.clone(),
            title: Some(field.label.clone()),
            description: field.description.clone(),
            min_length: validation.min_length,
            max_length: validation.max_length,
            ..CanonicalField::default()
        };
        properties.insert(name.clone(), canonical);

        if field.required {
            required.push(name.clone());
        }
    }

    CanonicalSchema::new(properties, required)
}

/// Normalizes a simple schema.
///
/// Object-typed fields become data-url string fields; the schema-level
/// `required` list is copied as-is.
pub fn normalize_simple(schema: &SimpleSchema) -> CanonicalSchema {
    let mut properties = IndexMap::with_capacity(schema.properties.len());

    for (name, field) in &schema.properties {
        let canonical = if field.is_file() {
            CanonicalField {
                field_type: "string".to_string(),
                title: Some(field.title.clone()),
                description: Some(FILE_DESCRIPTION.to_string()),
                format: Some(FILE_FORMAT.to_string()),
                ..CanonicalField::default()
            }
        } else {
            CanonicalField {
                field_type: field.field_type.clone(),
                title: Some(field.title.clone()),
                placeholder: field.placeholder.clone(),
                min_length: field.min_length,
                max_length: field.max_length,
                enum_values: field
                    .enum_values
                    .as_ref()
                    .map(|values| values.iter().cloned().map(Value::String).collect()),
                enum_names: field.enum_names.clone(),
                ..CanonicalField::default()
            }
        };
        properties.insert(name.clone(), canonical);
    }

    CanonicalSchema::new(properties, schema.required.clone())
}

/// Normalizes the page at `step_index` of either dialect.
///
/// A simple schema only has page 0.
pub fn normalize(schema: &RawSchema, step_index: usize) -> SchemaResult<CanonicalSchema> {
    let out_of_range = || SchemaError::StepOutOfRange {
        index: step_index,
        count: schema.step_count(),
    };

    match schema {
        RawSchema::Simple(simple) if step_index == 0 => Ok(normalize_simple(simple)),
        RawSchema::Simple(_) => Err(out_of_range()),
        RawSchema::MultiStep(multi) => multi
            .steps
            .get(step_index)
            .map(|step| normalize_step(&step.schema))
            .ok_or_else(out_of_range),
    }
}

/// Normalizes every page, in order, checking structural invariants.
pub fn normalize_all(schema: &RawSchema) -> SchemaResult<Vec<CanonicalSchema>> {
    let multi = schema.is_multi_step();
    (0..schema.step_count())
        .map(|index| {
            let canonical = normalize(schema, index)?;
            canonical.validate_structure(multi.then_some(index))?;
            Ok(canonical)
        })
        .collect()
}
