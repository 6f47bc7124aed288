//! Session transition errors
//!
//! These cover requests the state machine does not define, such as going
//! back from the first step. Validation failures are not errors; they come
//! back as `Rejected` outcomes.

use thiserror::Error;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Form already submitted; start a new session to fill it again")]
    AlreadySubmitted,

    #[error("Simple forms have a single step")]
    NotMultiStep,

    #[error("Step {step_index} is the last step; submit instead")]
    NoNextStep { step_index: usize },

    #[error("Already at the first step")]
    AtFirstStep,

    #[error("Submit is only available on the last step (at step {step_index} of {step_count})")]
    NotOnLastStep { step_index: usize, step_count: usize },
}

impl SessionError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::AlreadySubmitted => "FORM_SESSION_ALREADY_SUBMITTED",
            SessionError::NotMultiStep => "FORM_SESSION_NOT_MULTI_STEP",
            SessionError::NoNextStep { .. } => "FORM_SESSION_NO_NEXT_STEP",
            SessionError::AtFirstStep => "FORM_SESSION_AT_FIRST_STEP",
            SessionError::NotOnLastStep { .. } => "FORM_SESSION_NOT_ON_LAST_STEP",
        }
    }
}
