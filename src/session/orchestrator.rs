//! Step orchestrator
//!
//! A `FormSession` owns one fill of one form. Every transition goes through
//! `&mut self`, so events apply strictly in the order they arrive.

use std::fmt;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::observability::Event;
use crate::render::{Labels, RenderAdapter, RenderOverrides, RenderView};
use crate::result::{aggregate, FormResult};
use crate::schema::{
    check_definition, normalize_all, CanonicalSchema, FormDefinition, RawSchema, SchemaResult,
};
use crate::validation::{FieldErrors, FieldValidator, FieldValues};

use super::errors::{SessionError, SessionResult};
use super::events::{EventOutcome, FormEvent, StepOutcome, SubmitOutcome};
use super::state::{FormPhase, FormState, StepPosition};

/// Called once with the result of a successful submit.
pub type SubmitCallback = Box<dyn FnMut(&FormResult)>;

/// Presentation settings a session hands to its render adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionOptions {
    pub labels: Labels,
    pub overrides: RenderOverrides,
}

/// Creates a session with default labels and no render overrides.
///
/// # Errors
///
/// Any `SchemaError` raised while checking the definition or compiling its
/// validators. A session is never created from a defective schema.
pub fn create_form(
    definition: FormDefinition,
    on_submit: Option<SubmitCallback>,
) -> SchemaResult<FormSession> {
    FormSession::new(definition, SessionOptions::default(), on_submit)
}

pub struct FormSession {
    id: Uuid,
    definition: FormDefinition,
    /// One per step, in step order
    validators: Vec<FieldValidator>,
    state: FormState,
    options: SessionOptions,
    on_submit: Option<SubmitCallback>,
    result: Option<FormResult>,
}

impl FormSession {
    pub fn new(
        definition: FormDefinition,
        options: SessionOptions,
        on_submit: Option<SubmitCallback>,
    ) -> SchemaResult<Self> {
        check_definition(&definition)?;

        let validators = normalize_all(&definition.json_schema)?
            .into_iter()
            .map(FieldValidator::new)
            .collect::<SchemaResult<Vec<_>>>()?;

        let id = Uuid::new_v4();
        info!(
            event = Event::SessionCreated.as_str(),
            session = %id,
            form = %definition.id,
            kind = %definition.json_schema.kind(),
            steps = validators.len(),
            "session created"
        );

        Ok(Self {
            id,
            definition,
            validators,
            state: FormState::new(),
            options,
            on_submit,
            result: None,
        })
    }

    // ==================
    // Accessors
    // ==================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn values(&self) -> &FieldValues {
        self.state.cumulative_values()
    }

    pub fn errors(&self) -> &FieldErrors {
        self.state.errors()
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step_index()
    }

    pub fn step_count(&self) -> usize {
        self.validators.len()
    }

    pub fn is_multi_step(&self) -> bool {
        self.definition.is_multi_step()
    }

    pub fn is_submitted(&self) -> bool {
        self.state.is_submitted()
    }

    pub fn phase(&self) -> FormPhase {
        self.state.phase()
    }

    /// Canonical schema of the page being filled.
    pub fn current_schema(&self) -> &CanonicalSchema {
        self.current_validator().schema()
    }

    pub fn position(&self) -> StepPosition {
        let index = self.current_step();
        let title = self.definition.json_schema.step_title(index).unwrap_or_default();
        StepPosition::new(index, self.step_count(), title)
    }

    /// "Submit" on the last page, "Next" before it.
    pub fn submit_label(&self) -> &str {
        if self.position().is_last {
            &self.options.labels.submit
        } else {
            &self.options.labels.next
        }
    }

    /// The submitted result, once there is one.
    pub fn result(&self) -> Option<&FormResult> {
        self.result.as_ref()
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Layers `overrides` on top of the session's current ones.
    pub fn apply_overrides(&mut self, overrides: &RenderOverrides) {
        self.options.overrides = overrides.merged_onto(&self.options.overrides);
    }

    // ==================
    // Rendering
    // ==================

    pub fn view(&self) -> RenderView<'_> {
        let (title, description) = match &self.definition.json_schema {
            RawSchema::Simple(simple) => (simple.title.as_str(), simple.description.as_deref()),
            RawSchema::MultiStep(_) => (
                self.definition.title.as_str(),
                self.definition.description.as_deref(),
            ),
        };

        RenderView {
            title,
            description,
            schema: self.current_schema(),
            values: self.values(),
            errors: self.errors(),
            position: self.position(),
            submit_label: self.submit_label(),
            back_label: &self.options.labels.back,
            submitted: self.is_submitted(),
            overrides: &self.options.overrides,
        }
    }

    pub fn render(&self, adapter: &mut dyn RenderAdapter) {
        adapter.render(&self.view());
    }

    // ==================
    // Transitions
    // ==================

    /// Merges `partial` into the cumulative values and clears errors.
    pub fn change_current_step_values(&mut self, partial: FieldValues) -> SessionResult<()> {
        self.ensure_filling("change")?;

        let keys = partial.len();
        self.state.merge_values(partial);
        self.state.clear_errors();

        debug!(
            event = Event::FieldsChanged.as_str(),
            session = %self.id,
            step = self.current_step(),
            keys,
            "fields changed"
        );
        Ok(())
    }

    /// Moves to the next step if the current one validates.
    pub fn advance(&mut self) -> SessionResult<StepOutcome> {
        self.ensure_filling("advance")?;
        if !self.is_multi_step() {
            return Err(self.refuse("advance", SessionError::NotMultiStep));
        }
        let from = self.current_step();
        if from + 1 >= self.step_count() {
            return Err(self.refuse("advance", SessionError::NoNextStep { step_index: from }));
        }

        let errors = self.current_validator().validate(self.values());
        if !errors.is_empty() {
            info!(
                event = Event::StepRejected.as_str(),
                session = %self.id,
                step = from,
                errors = errors.len(),
                "advance rejected"
            );
            self.state.set_errors(errors.clone());
            return Ok(StepOutcome::Rejected { errors });
        }

        let to = from + 1;
        self.state.move_to(to);
        info!(
            event = Event::StepAdvanced.as_str(),
            session = %self.id,
            from,
            to,
            "step advanced"
        );
        Ok(StepOutcome::Advanced { step_index: to })
    }

    /// Moves to the previous step. Never validates.
    pub fn retreat(&mut self) -> SessionResult<usize> {
        self.ensure_filling("retreat")?;
        let from = self.current_step();
        if from == 0 {
            return Err(self.refuse("retreat", SessionError::AtFirstStep));
        }

        let to = from - 1;
        self.state.move_to(to);
        info!(
            event = Event::StepRetreated.as_str(),
            session = %self.id,
            from,
            to,
            "step retreated"
        );
        Ok(to)
    }

    /// Validates the current page and, if clean, produces the form result.
    ///
    /// On success the session becomes terminal and the submit callback, if
    /// any, runs exactly once.
    pub fn submit(&mut self) -> SessionResult<SubmitOutcome> {
        self.ensure_filling("submit")?;
        let position = self.position();
        if !position.is_last {
            return Err(self.refuse(
                "submit",
                SessionError::NotOnLastStep {
                    step_index: position.index,
                    step_count: position.count,
                },
            ));
        }

        let errors = self.current_validator().validate(self.values());
        if !errors.is_empty() {
            info!(
                event = Event::SubmitRejected.as_str(),
                session = %self.id,
                step = position.index,
                errors = errors.len(),
                "submit rejected"
            );
            self.state.set_errors(errors.clone());
            return Ok(SubmitOutcome::Rejected { errors });
        }

        let result = aggregate(&self.definition, self.values());
        self.state.mark_submitted();
        info!(
            event = Event::FormSubmitted.as_str(),
            session = %self.id,
            form = %self.definition.id,
            fields = result.fields.len(),
            submitted_at = %result.form_info.submitted_at,
            "form submitted"
        );

        if let Some(mut on_submit) = self.on_submit.take() {
            on_submit(&result);
        }
        self.result = Some(result.clone());
        Ok(SubmitOutcome::Submitted(Box::new(result)))
    }

    /// Applies one adapter event.
    pub fn handle(&mut self, event: FormEvent) -> SessionResult<EventOutcome> {
        match event {
            FormEvent::Change { values } => {
                self.change_current_step_values(values)?;
                Ok(EventOutcome::Changed)
            }
            FormEvent::Advance => self.advance().map(EventOutcome::from),
            FormEvent::Retreat => {
                let step_index = self.retreat()?;
                Ok(EventOutcome::Retreated { step_index })
            }
            FormEvent::Submit => self.submit().map(EventOutcome::from),
        }
    }

    fn current_validator(&self) -> &FieldValidator {
        // current_step < validators.len() holds for every reachable state
        &self.validators[self.current_step()]
    }

    fn ensure_filling(&self, action: &'static str) -> SessionResult<()> {
        if self.is_submitted() {
            return Err(self.refuse(action, SessionError::AlreadySubmitted));
        }
        Ok(())
    }

    fn refuse(&self, action: &'static str, error: SessionError) -> SessionError {
        warn!(
            event = Event::TransitionRefused.as_str(),
            session = %self.id,
            action,
            code = error.code(),
            step = self.current_step(),
            "{}",
            error
        );
        error
    }
}

impl fmt::Debug for FormSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSession")
            .field("id", &self.id)
            .field("form", &self.definition.id)
            .field("state", &self.state)
            .field("has_callback", &self.on_submit.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    use crate::schema::SchemaError;

    fn values(v: Value) -> FieldValues {
        v.as_object().cloned().unwrap()
    }

    fn three_steps() -> FormDefinition {
        let raw = json!({
            "isMultiStep": true,
            "steps": [
                {
                    "id": "personal",
                    "title": "Personal",
                    "schema": {
                        "type": "object",
                        "required": ["name"],
                        "properties": {
                            "name": { "id": "name", "name": "name", "type": "string", "label": "Name", "required": true }
                        }
                    }
                },
                {
                    "id": "contact",
                    "title": "Contact",
                    "schema": {
                        "type": "object",
                        "required": ["phone"],
                        "properties": {
                            "phone": {
                                "id": "phone", "name": "phone", "type": "string", "label": "Phone",
                                "required": true, "validation": { "minLength": 7 }
                            }
                        }
                    }
                },
                {
                    "id": "extra",
                    "title": "Extra",
                    "schema": {
                        "type": "object",
                        "required": [],
                        "properties": {
                            "notes": { "id": "notes", "name": "notes", "type": "string", "label": "Notes" }
                        }
                    }
                }
            ]
        });
        FormDefinition::new(7u64, "Signup", serde_json::from_value(raw).unwrap())
    }

    fn simple() -> FormDefinition {
        let raw = json!({
            "$id": "contact",
            "type": "object",
            "title": "Contact us",
            "required": ["email"],
            "properties": {
                "email": { "type": "string", "title": "Email" }
            }
        });
        FormDefinition::new("contact", "Contact", serde_json::from_value(raw).unwrap())
    }

    #[test]
    fn test_new_session_starts_at_first_step() {
        let session = create_form(three_steps(), None).unwrap();
        assert_eq!(session.current_step(), 0);
        assert_eq!(session.step_count(), 3);
        assert_eq!(session.phase(), FormPhase::Filling { step_index: 0 });
        assert_eq!(session.submit_label(), "Next");
        assert_eq!(session.position().title, "Personal");
    }

    #[test]
    fn test_advance_rejected_keeps_step() {
        let mut session = create_form(three_steps(), None).unwrap();
        let outcome = session.advance().unwrap();

        match outcome {
            StepOutcome::Rejected { errors } => {
                assert_eq!(errors.get("name").map(String::as_str), Some("Name is required"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(session.current_step(), 0);
        assert_eq!(session.errors().len(), 1);
    }

    #[test]
    fn test_change_clears_errors() {
        let mut session = create_form(three_steps(), None).unwrap();
        session.advance().unwrap();
        assert!(!session.errors().is_empty());

        session
            .change_current_step_values(values(json!({ "name": "Ana" })))
            .unwrap();
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_retreat_from_first_step_refused() {
        let mut session = create_form(three_steps(), None).unwrap();
        assert_eq!(session.retreat(), Err(SessionError::AtFirstStep));
        assert_eq!(session.current_step(), 0);
    }

    #[test]
    fn test_submit_before_last_step_refused() {
        let mut session = create_form(three_steps(), None).unwrap();
        assert_eq!(
            session.submit().unwrap_err(),
            SessionError::NotOnLastStep {
                step_index: 0,
                step_count: 3
            }
        );
    }

    #[test]
    fn test_advance_on_last_step_refused() {
        let mut session = create_form(three_steps(), None).unwrap();
        session
            .change_current_step_values(values(json!({ "name": "Ana", "phone": "5551234" })))
            .unwrap();
        session.advance().unwrap();
        session.advance().unwrap();
        assert_eq!(session.current_step(), 2);
        assert_eq!(session.submit_label(), "Submit");
        assert_eq!(
            session.advance().unwrap_err(),
            SessionError::NoNextStep { step_index: 2 }
        );
    }

    #[test]
    fn test_simple_form_has_one_step() {
        let mut session = create_form(simple(), None).unwrap();
        assert_eq!(session.step_count(), 1);
        assert_eq!(session.submit_label(), "Submit");
        assert_eq!(session.advance().unwrap_err(), SessionError::NotMultiStep);
        assert_eq!(session.retreat().unwrap_err(), SessionError::AtFirstStep);
    }

    #[test]
    fn test_events_after_submit_refused() {
        let mut session = create_form(simple(), None).unwrap();
        session
            .handle(FormEvent::Change {
                values: values(json!({ "email": "a@b.com" })),
            })
            .unwrap();
        let outcome = session.handle(FormEvent::Submit).unwrap();
        assert!(matches!(outcome, EventOutcome::Submitted { .. }));
        assert!(session.is_submitted());
        assert!(session.result().is_some());

        assert_eq!(
            session.handle(FormEvent::Submit).unwrap_err(),
            SessionError::AlreadySubmitted
        );
        assert_eq!(
            session
                .change_current_step_values(values(json!({ "email": "x@y.com" })))
                .unwrap_err(),
            SessionError::AlreadySubmitted
        );
        assert_eq!(session.values().get("email"), Some(&json!("a@b.com")));
    }

    #[test]
    fn test_view_for_simple_form_uses_schema_title() {
        let session = create_form(simple(), None).unwrap();
        let view = session.view();
        assert_eq!(view.title, "Contact us");
        assert_eq!(view.submit_label, "Submit");
        assert_eq!(view.back_label, "Back");
        assert!(!view.position.can_retreat);
        assert!(!view.submitted);
    }

    #[test]
    fn test_custom_labels() {
        let options = SessionOptions {
            labels: Labels {
                next: "Continuar".into(),
                back: "Atrás".into(),
                submit: "Enviar".into(),
            },
            overrides: RenderOverrides::default(),
        };
        let session = FormSession::new(three_steps(), options, None).unwrap();
        assert_eq!(session.submit_label(), "Continuar");
        assert_eq!(session.view().back_label, "Atrás");
    }

    #[test]
    fn test_apply_overrides_layers_on_top() {
        let mut session = create_form(simple(), None).unwrap();
        session.apply_overrides(&RenderOverrides {
            class_name: Some("base".into()),
            ..Default::default()
        });
        session.apply_overrides(&RenderOverrides {
            widgets: Some(values(json!({ "text": "fancy" }))),
            ..Default::default()
        });

        let overrides = &session.options().overrides;
        assert_eq!(overrides.class_name.as_deref(), Some("base"));
        assert!(overrides.widgets.is_some());
    }

    #[test]
    fn test_dialect_mismatch_blocks_session() {
        let mut definition = simple();
        definition.is_multi_step = Some(true);
        let err = create_form(definition, None).unwrap_err();
        assert!(matches!(err, SchemaError::DialectMismatch { .. }));
    }

    #[test]
    fn test_render_passes_current_view() {
        struct Capture(Vec<(usize, String)>);
        impl RenderAdapter for Capture {
            fn render(&mut self, view: &RenderView<'_>) {
                self.0.push((view.position.index, view.submit_label.to_string()));
            }
        }

        let session = create_form(three_steps(), None).unwrap();
        let mut adapter = Capture(Vec::new());
        session.render(&mut adapter);
        assert_eq!(adapter.0, vec![(0, "Next".to_string())]);
    }
}
