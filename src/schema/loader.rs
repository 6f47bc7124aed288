//! Form definition loader
//!
//! Definitions are JSON files, one form per file. Loading parses the
//! envelope, detects the schema dialect once, and checks every page's
//! canonical schema before the definition is handed to a session.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::observability::Event;

use super::errors::{SchemaError, SchemaResult};
use super::normalizer::normalize_all;
use super::types::{FormDefinition, RawSchema};

/// Reads form definitions from disk and keeps them in an in-memory registry.
pub struct SchemaLoader {
    /// Directory scanned by `load_all`
    form_dir: PathBuf,
    /// Loaded definitions keyed by form id
    forms: BTreeMap<String, FormDefinition>,
}

impl SchemaLoader {
    /// Creates a loader over `form_dir`.
    pub fn new(form_dir: &Path) -> Self {
        Self {
            form_dir: form_dir.to_path_buf(),
            forms: BTreeMap::new(),
        }
    }

    /// Loads every `*.json` file in the form directory.
    ///
    /// A missing directory is an empty registry. Any unreadable or invalid
    /// file aborts the whole load.
    pub fn load_all(&mut self) -> SchemaResult<usize> {
        if !self.form_dir.exists() {
            return Ok(0);
        }

        let entries = fs::read_dir(&self.form_dir).map_err(|e| io_error(&self.form_dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| io_error(&self.form_dir, e))?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        // read_dir order is platform-dependent
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            let definition = Self::load_file(&path)?;
            self.register(definition)?;
            loaded += 1;
        }

        Ok(loaded)
    }

    /// Loads and checks a single definition file.
    pub fn load_file(path: &Path) -> SchemaResult<FormDefinition> {
        let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parses and checks a definition from a JSON string.
    pub fn parse(content: &str, source_name: &str) -> SchemaResult<FormDefinition> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| SchemaError::malformed(source_name, e.to_string()))?;

        // Typed schema errors (NoSteps) surface before the envelope is decoded.
        if let Some(schema) = value.get("json_schema") {
            RawSchema::from_value(schema.clone(), source_name)?;
        }

        let definition: FormDefinition = serde_json::from_value(value)
            .map_err(|e| SchemaError::malformed(source_name, e.to_string()))?;

        check_definition(&definition)?;

        info!(
            event = Event::SchemaLoaded.as_str(),
            source = source_name,
            form = %definition.id,
            dialect = %definition.json_schema.kind(),
            steps = definition.json_schema.step_count(),
        );

        Ok(definition)
    }

    /// Adds a definition to the registry. Ids must be unique.
    pub fn register(&mut self, definition: FormDefinition) -> SchemaResult<()> {
        check_definition(&definition)?;

        let key = definition.id.to_string();
        if self.forms.contains_key(&key) {
            return Err(SchemaError::malformed(
                self.form_dir.display().to_string(),
                format!("duplicate form id '{}'", key),
            ));
        }

        self.forms.insert(key, definition);
        Ok(())
    }

    pub fn get(&self, form_id: &str) -> Option<&FormDefinition> {
        self.forms.get(form_id)
    }

    pub fn exists(&self, form_id: &str) -> bool {
        self.forms.contains_key(form_id)
    }

    /// Returns all definitions, ordered by id.
    pub fn all_forms(&self) -> impl Iterator<Item = &FormDefinition> {
        self.forms.values()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

/// Checks the structural invariants of a definition.
///
/// - the declared `isMultiStep` flag, when present, matches the dialect
/// - every page normalizes with no dangling required names
pub fn check_definition(definition: &FormDefinition) -> SchemaResult<()> {
    let detected = definition.json_schema.kind();
    if let Some(declared) = definition.is_multi_step {
        if declared != definition.json_schema.is_multi_step() {
            return Err(SchemaError::DialectMismatch { declared, detected });
        }
    }

    normalize_all(&definition.json_schema)?;
    warn_on_required_drift(&definition.json_schema);

    debug!(form = %definition.id, "definition passed structural checks");
    Ok(())
}

/// Step schemas carry both a `required` list and per-field flags. The flags
/// win; disagreement is logged, not rejected.
fn warn_on_required_drift(schema: &RawSchema) {
    let RawSchema::MultiStep(multi) = schema else {
        return;
    };

    for (index, step) in multi.steps.iter().enumerate() {
        let mut flagged: Vec<&str> = step
            .schema
            .properties
            .iter()
            .filter(|(_, field)| field.required)
            .map(|(name, _)| name.as_str())
            .collect();
        let mut listed: Vec<&str> = step.schema.required.iter().map(String::as_str).collect();
        flagged.sort_unstable();
        listed.sort_unstable();

        if flagged != listed {
            warn!(
                step = index,
                step_id = %step.id,
                flagged = ?flagged,
                listed = ?listed,
                "step required list disagrees with field flags; using field flags"
            );
        }
    }
}

fn io_error(path: &Path, e: std::io::Error) -> SchemaError {
    SchemaError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}
