//! Adapter events and their outcomes

use serde::{Deserialize, Serialize};

use crate::result::FormResult;
use crate::validation::{FieldErrors, FieldValues};

/// An inbound event from the render adapter.
///
/// JSON form: `{"type": "change", "values": {...}}`, `{"type": "advance"}`,
/// `{"type": "retreat"}`, `{"type": "submit"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormEvent {
    Change { values: FieldValues },
    Advance,
    Retreat,
    Submit,
}

impl FormEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FormEvent::Change { .. } => "change",
            FormEvent::Advance => "advance",
            FormEvent::Retreat => "retreat",
            FormEvent::Submit => "submit",
        }
    }
}

/// Result of `advance`.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Advanced { step_index: usize },
    /// Validation failed; the step did not change.
    Rejected { errors: FieldErrors },
}

/// Result of `submit`.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted(Box<FormResult>),
    /// Validation failed; the session is still filling.
    Rejected { errors: FieldErrors },
}

impl SubmitOutcome {
    pub fn result(&self) -> Option<&FormResult> {
        match self {
            SubmitOutcome::Submitted(result) => Some(&**result),
            SubmitOutcome::Rejected { .. } => None,
        }
    }
}

/// Result of handling any `FormEvent`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EventOutcome {
    Changed,
    Advanced { step_index: usize },
    Retreated { step_index: usize },
    Rejected { errors: FieldErrors },
    Submitted { result: Box<FormResult> },
}

impl From<StepOutcome> for EventOutcome {
    fn from(outcome: StepOutcome) -> Self {
        match outcome {
            StepOutcome::Advanced { step_index } => EventOutcome::Advanced { step_index },
            StepOutcome::Rejected { errors } => EventOutcome::Rejected { errors },
        }
    }
}

impl From<SubmitOutcome> for EventOutcome {
    fn from(outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Submitted(result) => EventOutcome::Submitted { result },
            SubmitOutcome::Rejected { errors } => EventOutcome::Rejected { errors },
        }
    }
}
