//! What the engine hands to a render adapter

use serde::{Deserialize, Serialize};

use crate::schema::CanonicalSchema;
use crate::session::StepPosition;
use crate::validation::{FieldErrors, FieldValues};

use super::overrides::RenderOverrides;

/// Button captions for the UI chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    #[serde(default = "default_next")]
    pub next: String,
    #[serde(default = "default_back")]
    pub back: String,
    #[serde(default = "default_submit")]
    pub submit: String,
}

fn default_next() -> String {
    "Next".to_string()
}
fn default_back() -> String {
    "Back".to_string()
}
fn default_submit() -> String {
    "Submit".to_string()
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            next: default_next(),
            back: default_back(),
            submit: default_submit(),
        }
    }
}

/// A read-only snapshot of one session, borrowed for a single paint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderView<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub schema: &'a CanonicalSchema,
    pub values: &'a FieldValues,
    pub errors: &'a FieldErrors,
    pub position: StepPosition,
    /// "Next" before the last step, "Submit" on it
    pub submit_label: &'a str,
    pub back_label: &'a str,
    pub submitted: bool,
    #[serde(skip_serializing_if = "RenderOverrides::is_empty")]
    pub overrides: &'a RenderOverrides,
}

/// The external painter. The engine calls it; it never calls back into
/// engine internals except through session operations.
pub trait RenderAdapter {
    fn render(&mut self, view: &RenderView<'_>);
}
