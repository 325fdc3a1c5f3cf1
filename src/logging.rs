//! Diagnostic logging setup.

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{HexdagError, Result};

/// Initializes the tracing subscriber at the given filter level.
///
/// Diagnostics go to stderr so they stay distinct from exported output
/// written to stdout.
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(level)
                .map_err(|e| HexdagError::InvalidArgument(format!("invalid log level: {e}")))?,
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| HexdagError::InvalidArgument("logging already initialized".into()))
}
