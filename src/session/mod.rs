//! Form sessions
//!
//! A session walks the user through the pages of one form:
//!
//! ```text
//! Filling(0) --advance--> Filling(1) --advance--> ... Filling(n-1) --submit--> Submitted
//!            <--retreat--            <--retreat--
//! ```
//!
//! Validation failures leave the state where it was and come back as
//! `Rejected` outcomes. Requests the machine does not define are
//! `SessionError`s.

mod errors;
mod events;
mod orchestrator;
mod state;

pub use errors::{SessionError, SessionResult};
pub use events::{EventOutcome, FormEvent, StepOutcome, SubmitOutcome};
pub use orchestrator::{create_form, FormSession, SessionOptions, SubmitCallback};
pub use state::{FormPhase, FormState, StepPosition};
