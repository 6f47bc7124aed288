//! Observable form lifecycle events
//!
//! Every log line the engine emits carries one of these as its `event`
//! field. Names are stable so downstream log tooling can match on them.

use std::fmt;

/// Observable events in a form's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Startup
    /// Configuration loaded
    ConfigLoaded,
    /// A form definition parsed and checked
    SchemaLoaded,

    // Session
    /// Session created from a definition
    SessionCreated,
    /// Field values merged into the session
    FieldsChanged,
    /// Moved to the next step
    StepAdvanced,
    /// Advance refused by validation
    StepRejected,
    /// Moved to the previous step
    StepRetreated,
    /// Submit refused by validation
    SubmitRejected,
    /// Form submitted and result produced
    FormSubmitted,
    /// Event not allowed in the current state
    TransitionRefused,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaLoaded => "SCHEMA_LOADED",

            Event::SessionCreated => "SESSION_CREATED",
            Event::FieldsChanged => "FIELDS_CHANGED",
            Event::StepAdvanced => "STEP_ADVANCED",
            Event::StepRejected => "STEP_REJECTED",
            Event::StepRetreated => "STEP_RETREATED",
            Event::SubmitRejected => "SUBMIT_REJECTED",
            Event::FormSubmitted => "FORM_SUBMITTED",
            Event::TransitionRefused => "TRANSITION_REFUSED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
