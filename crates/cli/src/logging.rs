//! Diagnostic output through `tracing`.
//!
//! Events go to the process's standard error. `RUST_LOG` applies unless a
//! `-v` flag asks for a level explicitly.

use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

fn filter_for(verbosity: u8) -> EnvFilter {
    match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Installs the global subscriber; later calls are no-ops.
pub(crate) fn init(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbosity))
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(true)
        .try_init();
}
