//! Result aggregation
//!
//! Walks the whole schema, not just the current page, and emits one record
//! per field that has a value. Declared-but-empty fields (missing or null)
//! are left out rather than emitted as null.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::Value;

use crate::schema::{FormDefinition, RawSchema};
use crate::validation::FieldValues;

use super::types::{FormInfo, FormResult, ResultField};

/// Result type name for object-typed simple fields.
pub const FILE_TYPE: &str = "file";

/// Aggregates `values` against `definition`, stamped with the current time.
pub fn aggregate(definition: &FormDefinition, values: &FieldValues) -> FormResult {
    aggregate_at(definition, values, Utc::now())
}

/// Aggregates with an explicit submission time.
pub fn aggregate_at(
    definition: &FormDefinition,
    values: &FieldValues,
    submitted_at: DateTime<Utc>,
) -> FormResult {
    let fields = match &definition.json_schema {
        RawSchema::MultiStep(multi) => {
            let mut fields = IndexMap::new();
            for step in &multi.steps {
                for (name, field) in &step.schema.properties {
                    if let Some(value) = filled(values, name) {
                        fields.insert(
                            name.clone(),
                            ResultField {
                                name: name.clone(),
                                value: value.clone(),
                                field_type: field.field_type.clone(),
                                title: field.label.clone(),
                                required: field.required,
                            },
                        );
                    }
                }
            }
            fields
        }
        RawSchema::Simple(simple) => simple
            .properties
            .iter()
            .filter_map(|(name, field)| {
                let value = filled(values, name)?;
                let field_type = if field.is_file() {
                    FILE_TYPE.to_string()
                } else {
                    field.field_type.clone()
                };
                Some((
                    name.clone(),
                    ResultField {
                        name: name.clone(),
                        value: value.clone(),
                        field_type,
                        title: field.title.clone(),
                        required: simple.is_required(name),
                    },
                ))
            })
            .collect(),
    };

    FormResult {
        form_info: FormInfo {
            id: definition.id.clone(),
            title: definition.title.clone(),
            is_multi_step: definition.is_multi_step(),
            submitted_at,
        },
        fields,
    }
}

fn filled<'a>(values: &'a FieldValues, name: &str) -> Option<&'a Value> {
    values.get(name).filter(|v| !v.is_null())
}
