//! CLI module for formwizard
//!
//! Provides command-line interface for:
//! - normalize: Print canonical schemas
//! - validate: Validate a values object
//! - fill: Drive a form session from JSON events
//! - list: Summarize a directory of forms

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{fill, list, normalize_form, run, run_command, validate_values};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, read_requests, write_error, write_response};
