//! Session Flow Tests
//!
//! End-to-end behavior of form sessions:
//! - Navigation keeps values from earlier steps
//! - Retreat never validates
//! - Submission aggregates every step and fires the callback once
//! - A submitted session refuses further events

use std::cell::RefCell;
use std::rc::Rc;

use formwizard::result::FormResult;
use formwizard::schema::{FormDefinition, SchemaLoader};
use formwizard::session::{
    create_form, EventOutcome, FormEvent, FormPhase, SessionError, StepOutcome, SubmitOutcome,
};
use formwizard::validation::FieldValues;
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn values(value: Value) -> FieldValues {
    value.as_object().cloned().unwrap()
}

fn step_field(name: &str, label: &str, required: bool) -> Value {
    json!({ "id": name, "name": name, "type": "string", "label": label, "required": required })
}

fn step(id: &str, title: &str, fields: Vec<(&str, &str, bool)>) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();
    for (name, label, is_required) in fields {
        properties.insert(name.to_string(), step_field(name, label, is_required));
        if is_required {
            required.push(name);
        }
    }
    json!({
        "id": id,
        "title": title,
        "schema": { "type": "object", "required": required, "properties": properties }
    })
}

fn definition(value: Value) -> FormDefinition {
    SchemaLoader::parse(&value.to_string(), "test").unwrap()
}

fn three_step_form() -> FormDefinition {
    definition(json!({
        "id": 10,
        "title": "Onboarding",
        "isMultiStep": true,
        "json_schema": {
            "isMultiStep": true,
            "steps": [
                step("profile", "Profile", vec![("first", "First name", true), ("last", "Last name", false)]),
                step("company", "Company", vec![("company", "Company", true)]),
                step("confirm", "Confirm", vec![("terms", "Terms", true)])
            ]
        }
    }))
}

fn two_step_form() -> FormDefinition {
    definition(json!({
        "id": "survey",
        "title": "Survey",
        "isMultiStep": true,
        "json_schema": {
            "steps": [
                step("one", "One", vec![("color", "Favorite color", true)]),
                step("two", "Two", vec![("animal", "Favorite animal", true), ("comment", "Comment", false)])
            ]
        }
    }))
}

fn simple_form() -> FormDefinition {
    definition(json!({
        "id": 1,
        "title": "Contact",
        "isMultiStep": false,
        "json_schema": {
            "$id": "contact",
            "type": "object",
            "title": "Contact us",
            "required": ["name", "email"],
            "properties": {
                "name": { "type": "string", "title": "Name" },
                "email": { "type": "string", "title": "Email" },
                "cv": { "type": "object", "title": "CV" }
            }
        }
    }))
}

// =============================================================================
// Navigation Tests
// =============================================================================

/// Advancing from step 0 keeps the step-0 values.
#[test]
fn test_advance_keeps_previous_values() {
    let mut session = create_form(three_step_form(), None).unwrap();
    session
        .change_current_step_values(values(json!({ "first": "Ada", "last": "Lovelace" })))
        .unwrap();

    assert_eq!(
        session.advance().unwrap(),
        StepOutcome::Advanced { step_index: 1 }
    );
    assert_eq!(session.current_step(), 1);
    assert_eq!(session.values()["first"], "Ada");
    assert_eq!(session.values()["last"], "Lovelace");
    assert_eq!(session.position().title, "Company");
}

/// Retreat clears errors and does not validate.
#[test]
fn test_retreat_clears_errors_without_validating() {
    let mut session = create_form(three_step_form(), None).unwrap();
    session
        .change_current_step_values(values(json!({ "first": "Ada" })))
        .unwrap();
    session.advance().unwrap();

    // step 1 is invalid: company missing
    let rejected = session.advance().unwrap();
    assert!(matches!(rejected, StepOutcome::Rejected { .. }));
    assert_eq!(session.errors()["company"], "Company is required");

    assert_eq!(session.retreat().unwrap(), 0);
    assert_eq!(session.current_step(), 0);
    assert!(session.errors().is_empty());
    assert_eq!(session.values()["first"], "Ada");
}

/// Values entered on later steps survive going back.
#[test]
fn test_values_survive_round_trip_navigation() {
    let mut session = create_form(three_step_form(), None).unwrap();
    session
        .change_current_step_values(values(json!({ "first": "Ada" })))
        .unwrap();
    session.advance().unwrap();
    session
        .change_current_step_values(values(json!({ "company": "Analytical Engines" })))
        .unwrap();
    session.retreat().unwrap();
    session.advance().unwrap();

    assert_eq!(session.values()["company"], "Analytical Engines");
    assert_eq!(
        session.advance().unwrap(),
        StepOutcome::Advanced { step_index: 2 }
    );
}

/// Only the current step is validated on advance.
#[test]
fn test_advance_validates_current_step_only() {
    let mut session = create_form(three_step_form(), None).unwrap();
    session
        .change_current_step_values(values(json!({ "first": "Ada" })))
        .unwrap();

    // "company" on step 1 is empty but does not block step 0
    assert!(matches!(
        session.advance().unwrap(),
        StepOutcome::Advanced { .. }
    ));
}

/// Structurally impossible requests leave the state alone.
#[test]
fn test_refused_transitions_leave_state_unchanged() {
    let mut session = create_form(three_step_form(), None).unwrap();
    let before = session.state().clone();

    assert_eq!(session.retreat().unwrap_err(), SessionError::AtFirstStep);
    assert!(matches!(
        session.submit().unwrap_err(),
        SessionError::NotOnLastStep { .. }
    ));
    assert_eq!(session.state(), &before);
}

// =============================================================================
// Submission Tests
// =============================================================================

/// Simple form end to end: exactly the filled fields, with metadata.
#[test]
fn test_simple_form_end_to_end() {
    let mut session = create_form(simple_form(), None).unwrap();

    let rejected = session.submit().unwrap();
    match rejected {
        SubmitOutcome::Rejected { errors } => {
            assert_eq!(errors["name"], "Name is required");
            assert_eq!(errors["email"], "Email is required");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert!(!session.is_submitted());

    session
        .change_current_step_values(values(json!({ "name": "Ana", "email": "ana@example.com" })))
        .unwrap();
    let outcome = session.submit().unwrap();
    let result = outcome.result().unwrap();

    assert_eq!(result.fields.len(), 2);
    let name = result.field("name").unwrap();
    assert_eq!(name.value, json!("Ana"));
    assert_eq!(name.field_type, "string");
    assert_eq!(name.title, "Name");
    assert!(name.required);

    let email = result.field("email").unwrap();
    assert_eq!(email.title, "Email");
    assert!(email.required);

    assert_eq!(result.form_info.title, "Contact");
    assert!(!result.form_info.is_multi_step);

    let json = serde_json::to_value(result).unwrap();
    let submitted_at = json["formInfo"]["submittedAt"].as_str().unwrap();
    assert!(!submitted_at.is_empty());
    assert_eq!(session.phase(), FormPhase::Submitted);
}

/// File fields are reported with type "file".
#[test]
fn test_simple_form_file_field() {
    let mut session = create_form(simple_form(), None).unwrap();
    session
        .change_current_step_values(values(json!({
            "name": "Ana",
            "email": "ana@example.com",
            "cv": "data:application/pdf;base64,AAAA"
        })))
        .unwrap();

    let outcome = session.submit().unwrap();
    let cv = outcome.result().unwrap().field("cv").unwrap();
    assert_eq!(cv.field_type, "file");
    assert!(!cv.required);
}

/// Two-step form end to end: fields from both steps are in the result.
#[test]
fn test_multi_step_form_end_to_end() {
    let mut session = create_form(two_step_form(), None).unwrap();
    session
        .handle(FormEvent::Change {
            values: values(json!({ "color": "green" })),
        })
        .unwrap();
    session.handle(FormEvent::Advance).unwrap();
    session
        .handle(FormEvent::Change {
            values: values(json!({ "animal": "owl", "comment": null })),
        })
        .unwrap();

    let outcome = session.handle(FormEvent::Submit).unwrap();
    let result = match outcome {
        EventOutcome::Submitted { result } => result,
        other => panic!("expected submission, got {:?}", other),
    };

    let names: Vec<&str> = result.fields.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["color", "animal"]);
    assert_eq!(result.field("color").unwrap().title, "Favorite color");
    assert_eq!(result.field("animal").unwrap().value, json!("owl"));
    assert!(result.form_info.is_multi_step);
    assert_eq!(result.form_info.id.to_string(), "survey");
}

/// The submit callback runs exactly once and sees the returned result.
#[test]
fn test_submit_callback_runs_once() {
    let seen: Rc<RefCell<Vec<FormResult>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut session = create_form(
        simple_form(),
        Some(Box::new(move |result: &FormResult| {
            sink.borrow_mut().push(result.clone())
        })),
    )
    .unwrap();

    // rejected submit does not fire
    session.submit().unwrap();
    assert!(seen.borrow().is_empty());

    session
        .change_current_step_values(values(json!({ "name": "Ana", "email": "a@b.com" })))
        .unwrap();
    let outcome = session.submit().unwrap();
    assert_eq!(session.submit().unwrap_err(), SessionError::AlreadySubmitted);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(Some(&seen[0]), outcome.result());
    assert_eq!(session.result(), Some(&seen[0]));
}

/// Nothing is accepted after submission.
#[test]
fn test_submitted_session_is_terminal() {
    let mut session = create_form(two_step_form(), None).unwrap();
    session
        .change_current_step_values(values(json!({ "color": "red" })))
        .unwrap();
    session.advance().unwrap();
    session
        .change_current_step_values(values(json!({ "animal": "cat" })))
        .unwrap();
    session.submit().unwrap();

    for event in [
        FormEvent::Advance,
        FormEvent::Retreat,
        FormEvent::Submit,
        FormEvent::Change {
            values: values(json!({ "animal": "dog" })),
        },
    ] {
        assert_eq!(
            session.handle(event).unwrap_err(),
            SessionError::AlreadySubmitted
        );
    }
    assert_eq!(session.values()["animal"], "cat");
}
