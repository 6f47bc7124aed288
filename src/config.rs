//! Runtime configuration
//!
//! Loaded from an optional JSON file. Every key has a default, so `{}` is a
//! valid configuration.
//!
//! ```json
//! {
//!   "log_filter": "formwizard=debug",
//!   "labels": { "next": "Continuar", "back": "Atrás", "submit": "Enviar" },
//!   "render": { "className": "wizard" }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::observability::Event;
use crate::render::{Labels, RenderOverrides};
use crate::session::SessionOptions;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    Json(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "FORM_CONFIG_IO",
            ConfigError::Json(_) => "FORM_CONFIG_JSON",
            ConfigError::Invalid(_) => "FORM_CONFIG_INVALID",
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Default `tracing` filter; `RUST_LOG` wins when set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Button captions
    #[serde(default)]
    pub labels: Labels,

    /// Opaque customization handed to the render adapter
    #[serde(default)]
    pub render: RenderOverrides,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            labels: Labels::default(),
            render: RenderOverrides::default(),
        }
    }
}

impl FormConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config = Self::parse(&content)?;

        info!(
            event = Event::ConfigLoaded.as_str(),
            path = %path.display(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn parse(content: &str) -> ConfigResult<Self> {
        let config: FormConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log_filter must not be empty".into()));
        }

        for (name, label) in [
            ("next", &self.labels.next),
            ("back", &self.labels.back),
            ("submit", &self.labels.submit),
        ] {
            if label.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "labels.{} must not be empty",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Presentation settings for new sessions.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            labels: self.labels.clone(),
            overrides: self.render.clone(),
        }
    }
}
