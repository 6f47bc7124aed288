//! Render customization passed through to the adapter
//!
//! The engine never interprets these values. Each override point is
//! optional and independent; map-valued points merge key by key, with the
//! override winning.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOverrides {
    /// Widget replacements keyed by widget name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widgets: Option<Map<String, Value>>,
    /// Template replacements keyed by template name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<Map<String, Value>>,
    /// Field component replacements keyed by field kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl RenderOverrides {
    /// Returns `defaults` with `self` applied on top.
    pub fn merged_onto(&self, defaults: &RenderOverrides) -> RenderOverrides {
        RenderOverrides {
            widgets: merge_point(&defaults.widgets, &self.widgets),
            templates: merge_point(&defaults.templates, &self.templates),
            fields: merge_point(&defaults.fields, &self.fields),
            class_name: self.class_name.clone().or_else(|| defaults.class_name.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &RenderOverrides::default()
    }
}

fn merge_point(
    base: &Option<Map<String, Value>>,
    over: &Option<Map<String, Value>>,
) -> Option<Map<String, Value>> {
    match (base, over) {
        (None, None) => None,
        (Some(b), None) => Some(b.clone()),
        (None, Some(o)) => Some(o.clone()),
        (Some(b), Some(o)) => {
            let mut merged = b.clone();
            for (key, value) in o {
                merged.insert(key.clone(), value.clone());
            }
            Some(merged)
        }
    }
}
