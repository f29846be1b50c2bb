//! Logging initialization

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map the `-v` count to the default log level
#[must_use]
pub const fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::ERROR,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Filter built from `RUST_LOG` directives and the `-v` count.
///
/// Without `-v`, `RUST_LOG` decides and the level falls back to error when it
/// is unset. An explicit `-v` overrides the global level.
#[must_use]
pub fn build_filter(verbosity: u8, directives: &str) -> EnvFilter {
    if verbosity == 0 {
        EnvFilter::builder()
            .with_default_directive(level_for(0).into())
            .parse_lossy(directives)
    } else {
        EnvFilter::builder()
            .parse_lossy(directives)
            .add_directive(level_for(verbosity).into())
    }
}

/// Initialize tracing subscriber for logging
///
/// Configures the tracing subscriber with:
/// - Environment filter (`RUST_LOG`), plus the level chosen by `-v`
/// - Stderr output (to avoid mixing with command output)
pub fn init_tracing(verbosity: u8) -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity, &directives))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}
