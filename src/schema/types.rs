//! Schema type definitions
//!
//! Two authoring dialects are accepted:
//! - simple: a flat property map with a schema-level `required` list
//! - multi-step: an ordered list of steps, each with per-field descriptors
//!
//! Both are reduced to one `CanonicalSchema` before validation.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};

/// Which authoring dialect a raw schema was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaKind {
    Simple,
    MultiStep,
}

impl SchemaKind {
    /// Returns the dialect name for messages and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::Simple => "simple",
            SchemaKind::MultiStep => "multi-step",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Simple dialect
// =============================================================================

/// A property in the simple dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleField {
    #[serde(rename = "type")]
    pub field_type: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_names: Option<Vec<String>>,
}

impl SimpleField {
    /// Object-typed fields stand for file uploads.
    pub fn is_file(&self) -> bool {
        self.field_type == "object"
    }
}

/// Flat schema with required fields declared at the schema level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleSchema {
    #[serde(rename = "$id", alias = "id")]
    pub id: String,
    #[serde(rename = "type")]
    pub schema_type: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: Vec<String>,
    pub properties: IndexMap<String, SimpleField>,
}

impl SimpleSchema {
    /// Whether `name` appears in the schema-level required list
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

// =============================================================================
// Multi-step dialect
// =============================================================================

/// Length bounds attached to a step field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
}

/// A field descriptor in the multi-step dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepField {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<StepValidation>,
}

/// The sub-schema carried by one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Authored list; the per-field `required` flags are authoritative.
    #[serde(default)]
    pub required: Vec<String>,
    pub properties: IndexMap<String, StepField>,
}

/// One page of a multi-step form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub title: String,
    pub schema: StepSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiStepSchema {
    pub steps: Vec<Step>,
    #[serde(default = "default_true")]
    pub is_multi_step: bool,
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Raw schema union
// =============================================================================

/// A raw schema in either dialect.
///
/// The dialect is decided once, when the JSON is parsed: an object with a
/// `steps` key is multi-step, anything else is simple.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawSchema {
    Simple(SimpleSchema),
    MultiStep(MultiStepSchema),
}

impl RawSchema {
    /// Parses a raw schema, detecting its dialect from its shape.
    pub fn from_value(value: Value, source_name: &str) -> SchemaResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| SchemaError::malformed(source_name, "schema must be a JSON object"))?;

        if obj.contains_key("steps") {
            let schema: MultiStepSchema = serde_json::from_value(value)
                .map_err(|e| SchemaError::malformed(source_name, e.to_string()))?;
            if schema.steps.is_empty() {
                return Err(SchemaError::NoSteps);
            }
            Ok(RawSchema::MultiStep(schema))
        } else {
            let schema: SimpleSchema = serde_json::from_value(value)
                .map_err(|e| SchemaError::malformed(source_name, e.to_string()))?;
            Ok(RawSchema::Simple(schema))
        }
    }

    pub fn kind(&self) -> SchemaKind {
        match self {
            RawSchema::Simple(_) => SchemaKind::Simple,
            RawSchema::MultiStep(_) => SchemaKind::MultiStep,
        }
    }

    pub fn is_multi_step(&self) -> bool {
        self.kind() == SchemaKind::MultiStep
    }

    /// Number of pages; a simple form is a single page.
    pub fn step_count(&self) -> usize {
        match self {
            RawSchema::Simple(_) => 1,
            RawSchema::MultiStep(schema) => schema.steps.len(),
        }
    }

    /// Title of the page at `index`. Simple forms use the schema title.
    pub fn step_title(&self, index: usize) -> Option<&str> {
        match self {
            RawSchema::Simple(schema) if index == 0 => Some(&schema.title),
            RawSchema::Simple(_) => None,
            RawSchema::MultiStep(schema) => schema.steps.get(index).map(|s| s.title.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for RawSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        RawSchema::from_value(value, "json_schema").map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Canonical schema
// =============================================================================

/// A field of the canonical validation schema.
///
/// Only constraints the source declared are present; nothing is defaulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalField {
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl CanonicalField {
    pub fn new(field_type: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_length(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_range(mut self, minimum: Option<f64>, maximum: Option<f64>) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.enum_values = Some(values);
        self
    }
}

/// The single validation schema shape every dialect normalizes into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: IndexMap<String, CanonicalField>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl CanonicalSchema {
    /// Create an object schema
    pub fn new(properties: IndexMap<String, CanonicalField>, required: Vec<String>) -> Self {
        Self {
            schema_type: "object".to_string(),
            properties,
            required,
        }
    }

    /// Display title of a field, falling back to its name.
    pub fn title_of<'a>(&'a self, name: &'a str) -> &'a str {
        self.properties
            .get(name)
            .and_then(|f| f.title.as_deref())
            .unwrap_or(name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Checks that every required name is a declared property.
    ///
    /// `step` only labels the error.
    pub fn validate_structure(&self, step: Option<usize>) -> SchemaResult<()> {
        for name in &self.required {
            if !self.properties.contains_key(name) {
                return Err(SchemaError::UnknownRequiredField {
                    field: name.clone(),
                    step,
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Form definition envelope
// =============================================================================

/// Identifier of a published form: numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormId {
    Number(u64),
    Text(String),
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormId::Number(n) => write!(f, "{}", n),
            FormId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for FormId {
    fn from(n: u64) -> Self {
        FormId::Number(n)
    }
}

impl From<&str> for FormId {
    fn from(s: &str) -> Self {
        FormId::Text(s.to_string())
    }
}

/// A published form: metadata plus its raw schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    pub id: FormId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared dialect; checked against the detected one on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_multi_step: Option<bool>,
    #[serde(rename = "json_schema")]
    pub json_schema: RawSchema,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl FormDefinition {
    /// Wraps a raw schema with the minimum metadata.
    pub fn new(id: impl Into<FormId>, title: impl Into<String>, json_schema: RawSchema) -> Self {
        Self {
            id: id.into(),
            document_id: None,
            title: title.into(),
            description: None,
            is_multi_step: Some(json_schema.is_multi_step()),
            json_schema,
            created_at: None,
            updated_at: None,
            published_at: None,
        }
    }

    /// Whether the form is multi-step, as detected from its schema.
    pub fn is_multi_step(&self) -> bool {
        self.json_schema.is_multi_step()
    }
}
