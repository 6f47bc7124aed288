//! CLI command implementations
//!
//! Each command reads JSON from stdin and answers with one JSON response
//! per line on stdout. Logs go to stderr.

use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::Path;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::FormConfig;
use crate::observability::init_logging;
use crate::render::{RenderAdapter, RenderView};
use crate::schema::{normalize, normalize_all, CanonicalSchema, SchemaLoader};
use crate::session::{FormEvent, FormSession, SessionOptions};
use crate::validation::FieldValidator;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_request, read_requests, write_error, write_response};

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = FormConfig::load_or_default(cli.command.config_path().map(|p| p.as_path()))?;
    init_logging(&config.log_filter);
    run_command(cli.command, &config)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, config: &FormConfig) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cmd {
        Command::Normalize { form, step, .. } => normalize_form(&form, step, &mut out),
        Command::Validate { schema, .. } => validate_values(&schema, stdin.lock(), &mut out),
        Command::Fill { form, .. } => fill(&form, config.session_options(), stdin.lock(), &mut out),
        Command::List { dir, .. } => list(&dir, &mut out),
    }
}

/// Print the canonical schema of one step, or of every step.
pub fn normalize_form<W: Write>(form: &Path, step: Option<usize>, out: &mut W) -> CliResult<()> {
    let definition = SchemaLoader::load_file(form)?;

    let data = match step {
        Some(index) => serde_json::to_value(normalize(&definition.json_schema, index)?)?,
        None => serde_json::to_value(normalize_all(&definition.json_schema)?)?,
    };

    write_response(out, data)
}

/// Validate a values object from `input` against a canonical schema file.
pub fn validate_values<R: Read, W: Write>(
    schema_path: &Path,
    input: R,
    out: &mut W,
) -> CliResult<()> {
    let content = fs::read_to_string(schema_path).map_err(|e| {
        CliError::io_error(format!("Failed to read {}: {}", schema_path.display(), e))
    })?;
    let schema: CanonicalSchema = serde_json::from_str(&content)?;
    schema.validate_structure(None)?;
    let validator = FieldValidator::new(schema)?;

    let values = match read_request(input)? {
        Value::Object(values) => values,
        _ => return Err(CliError::invalid_input("values must be a JSON object")),
    };

    let errors = validator.validate(&values);
    write_response(
        out,
        json!({
            "valid": errors.is_empty(),
            "errors": errors,
        }),
    )
}

/// Drive a session from newline-delimited `FormEvent`s.
///
/// The first response carries the initial view. Every event then gets one
/// response: the outcome plus the view after it, or an error. Bad events do
/// not end the session.
pub fn fill<R: BufRead, W: Write>(
    form: &Path,
    options: SessionOptions,
    input: R,
    out: &mut W,
) -> CliResult<()> {
    let definition = SchemaLoader::load_file(form)?;
    let mut session = FormSession::new(definition, options, None)?;
    let mut renderer = JsonRenderer::default();

    session.render(&mut renderer);
    write_response(
        out,
        json!({
            "session": session.id().to_string(),
            "view": renderer.take(),
        }),
    )?;

    for request in read_requests(input) {
        let event: FormEvent = match request.and_then(|v| Ok(serde_json::from_value(v)?)) {
            Ok(event) => event,
            Err(e) => {
                write_error(out, e.code(), &e.message())?;
                continue;
            }
        };
        debug!(event_type = event.name(), "event received");

        match session.handle(event) {
            Ok(outcome) => {
                session.render(&mut renderer);
                write_response(
                    out,
                    json!({
                        "outcome": outcome,
                        "view": renderer.take(),
                    }),
                )?;
            }
            Err(e) => write_error(out, e.code(), &e.to_string())?,
        }
    }

    Ok(())
}

/// Summarize every definition found in `dir`.
pub fn list<W: Write>(dir: &Path, out: &mut W) -> CliResult<()> {
    let mut loader = SchemaLoader::new(dir);
    loader.load_all()?;

    let forms: Vec<Value> = loader
        .all_forms()
        .map(|definition| {
            json!({
                "id": definition.id,
                "title": definition.title,
                "isMultiStep": definition.is_multi_step(),
                "steps": definition.json_schema.step_count(),
            })
        })
        .collect();

    write_response(out, Value::Array(forms))
}

/// Render adapter that captures each view as JSON.
#[derive(Debug, Default)]
struct JsonRenderer {
    last: Value,
}

impl JsonRenderer {
    fn take(&mut self) -> Value {
        std::mem::take(&mut self.last)
    }
}

impl RenderAdapter for JsonRenderer {
    fn render(&mut self, view: &RenderView<'_>) {
        self.last = serde_json::to_value(view).unwrap_or_else(|e| {
            warn!(error = %e, "view could not be serialized");
            Value::Null
        });
    }
}
