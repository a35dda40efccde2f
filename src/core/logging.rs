//! Tracing subscriber setup
//!
//! Logs go to stderr so they never interleave with the board drawn on stdout.
//! Verbosity follows `RUST_LOG` and defaults to `info`.

use crate::core::error::{CoreError, CoreResult};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

pub fn init_logging() -> CoreResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| CoreError::Logging {
            message: e.to_string(),
        })
}
