//! CLI argument definitions using clap
//!
//! Commands:
//! - formwizard normalize --form <path> [--step <n>]
//! - formwizard validate --schema <path>
//! - formwizard fill --form <path>
//! - formwizard list --dir <path>
//!
//! Every command accepts `--config <path>`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// formwizard - JSON-schema driven form engine
#[derive(Parser, Debug)]
#[command(name = "formwizard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the canonical validation schema of a form
    Normalize {
        /// Path to a form definition
        #[arg(long)]
        form: PathBuf,

        /// Only this step (zero-based); all steps when omitted
        #[arg(long)]
        step: Option<usize>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a values object read from stdin
    Validate {
        /// Path to a canonical schema
        #[arg(long)]
        schema: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Fill a form from newline-delimited events on stdin
    Fill {
        /// Path to a form definition
        #[arg(long)]
        form: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the form definitions in a directory
    List {
        /// Directory of *.json form definitions
        #[arg(long, default_value = "./forms")]
        dir: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Command {
    pub fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Command::Normalize { config, .. }
            | Command::Validate { config, .. }
            | Command::Fill { config, .. }
            | Command::List { config, .. } => config.as_ref(),
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
