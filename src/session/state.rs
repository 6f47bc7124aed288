//! Mutable session state
//!
//! Only the owning `FormSession` mutates a `FormState`. The validator and
//! the aggregator read it and return new values.

use serde::Serialize;

use crate::validation::{FieldErrors, FieldValues};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Filling { step_index: usize },
    /// Terminal
    Submitted,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    current_step_index: usize,
    cumulative_values: FieldValues,
    errors: FieldErrors,
    submitted: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    /// Values captured on every step visited so far.
    pub fn cumulative_values(&self) -> &FieldValues {
        &self.cumulative_values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn phase(&self) -> FormPhase {
        if self.submitted {
            FormPhase::Submitted
        } else {
            FormPhase::Filling {
                step_index: self.current_step_index,
            }
        }
    }

    /// Overlays `partial` onto the cumulative values. Keys not in `partial`
    /// are kept.
    pub(super) fn merge_values(&mut self, partial: FieldValues) {
        for (name, value) in partial {
            self.cumulative_values.insert(name, value);
        }
    }

    pub(super) fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub(super) fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub(super) fn move_to(&mut self, step_index: usize) {
        self.current_step_index = step_index;
        self.errors.clear();
    }

    pub(super) fn mark_submitted(&mut self) {
        self.submitted = true;
        self.errors.clear();
    }
}

/// Step indicator for the UI chrome ("step 2 of 3").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPosition {
    /// Zero-based
    pub index: usize,
    pub count: usize,
    pub title: String,
    pub progress_percent: u8,
    pub can_retreat: bool,
    pub is_last: bool,
}

impl StepPosition {
    pub fn new(index: usize, count: usize, title: impl Into<String>) -> Self {
        let count = count.max(1);
        Self {
            index,
            count,
            title: title.into(),
            progress_percent: (((index + 1) * 100) / count).min(100) as u8,
            can_retreat: index > 0,
            is_last: index + 1 >= count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_keeps_other_keys() {
        let mut state = FormState::new();
        state.merge_values(json!({ "a": 1, "b": 2 }).as_object().unwrap().clone());
        state.merge_values(json!({ "b": 3, "c": 4 }).as_object().unwrap().clone());

        assert_eq!(
            serde_json::Value::Object(state.cumulative_values().clone()),
            json!({ "a": 1, "b": 3, "c": 4 })
        );
    }

    #[test]
    fn test_move_clears_errors() {
        let mut state = FormState::new();
        let mut errors = FieldErrors::new();
        errors.insert("a".into(), "A is required".into());
        state.set_errors(errors);

        state.move_to(1);
        assert_eq!(state.current_step_index(), 1);
        assert!(state.errors().is_empty());
    }

    #[test]
    fn test_phase() {
        let mut state = FormState::new();
        assert_eq!(state.phase(), FormPhase::Filling { step_index: 0 });
        state.mark_submitted();
        assert_eq!(state.phase(), FormPhase::Submitted);
    }

    #[test]
    fn test_step_position() {
        let first = StepPosition::new(0, 3, "Personal");
        assert_eq!(first.progress_percent, 33);
        assert!(!first.can_retreat);
        assert!(!first.is_last);
        assert_eq!(first.title, "Personal");

        let last = StepPosition::new(2, 3, "Confirm");
        assert_eq!(last.progress_percent, 100);
        assert!(last.can_retreat);
        assert!(last.is_last);

        let single = StepPosition::new(0, 1, "Contact");
        assert!(single.is_last);
        assert_eq!(single.progress_percent, 100);
    }
}
