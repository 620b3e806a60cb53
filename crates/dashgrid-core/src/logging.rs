#![forbid(unsafe_code)]

//! Structured logging.
//!
//! The crates log through `tracing`; the macros are re-exported here so
//! downstream code can use `dashgrid_core::logging::debug!` without naming the
//! dependency. With the `tracing-json` feature, [`init_json_logging`] installs
//! a JSON subscriber filtered by an `EnvFilter` directive string.

pub use tracing::{debug, debug_span, error, info, info_span, trace, warn};

#[cfg(feature = "tracing-json")]
use std::fmt;

/// A global subscriber was already installed, or the filter did not parse.
#[cfg(feature = "tracing-json")]
#[derive(Debug)]
pub struct LoggingInitError(String);

#[cfg(feature = "tracing-json")]
impl fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to initialize logging: {}", self.0)
    }
}

#[cfg(feature = "tracing-json")]
impl std::error::Error for LoggingInitError {}

/// Install a JSON-formatted global subscriber.
///
/// `filter` uses `EnvFilter` syntax, e.g. `"dashgrid_runtime=debug,info"`.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging(filter: &str) -> Result<(), LoggingInitError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(filter).map_err(|e| LoggingInitError(e.to_string()))?;
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| LoggingInitError(e.to_string()))
}
