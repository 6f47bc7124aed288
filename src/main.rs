//! formwizard CLI entry point
//!
//! Parses arguments, runs the command, prints any fatal error to stderr and
//! exits non-zero. All logic lives in the `cli` module.

use formwizard::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
