//! Submitted form result types

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::FormId;

/// Submission metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInfo {
    pub id: FormId,
    pub title: String,
    pub is_multi_step: bool,
    pub submitted_at: DateTime<Utc>,
}

/// One filled field with the metadata its schema declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultField {
    pub name: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub field_type: String,
    pub title: String,
    pub required: bool,
}

/// The terminal output of a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResult {
    pub form_info: FormInfo,
    /// Filled fields in schema declaration order
    pub fields: IndexMap<String, ResultField>,
}

impl FormResult {
    pub fn field(&self, name: &str) -> Option<&ResultField> {
        self.fields.get(name)
    }
}
