#![forbid(unsafe_code)]

//! Log file setup.
//!
//! The console owns the alternate screen, so logs go to a file. The filter
//! comes from `FOLIO_LOG` (standard `EnvFilter` directives) and defaults to
//! `info`.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "FOLIO_LOG";

/// Build the filter from `FOLIO_LOG`, falling back to `info`.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `path` (appending).
///
/// A subscriber that is already installed is left in place.
pub fn init(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file));
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(layer)
        .try_init();
    Ok(())
}
