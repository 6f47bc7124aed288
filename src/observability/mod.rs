//! Observability for formwizard
//!
//! Structured logs go through `tracing`. Each lifecycle log line carries an
//! `event` field naming an [`Event`]; session lines also carry `session`.
//! Output goes to stderr so stdout stays free for JSON responses.

mod events;

pub use events::Event;

use tracing_subscriber::EnvFilter;

/// Installs the global log subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Calling this twice is
/// harmless: the second install is ignored.
pub fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
