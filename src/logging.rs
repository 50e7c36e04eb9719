//! Logging setup
//!
//! The terminal is owned by the UI, so log output goes to a file. The
//! level comes from the CLI verbosity unless `RUST_LOG` is set.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{RelcheckError, Result, APP_NAME, LOG_FILE};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Info and above.
    #[default]
    Normal,
    /// Debug and above.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    /// Convert verbosity to a tracing level.
    pub fn to_level(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Default log file location: `$CACHE_HOME/relcheck/relcheck.log`
pub fn default_log_path() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir().ok_or_else(|| {
        RelcheckError::Config("Unable to determine cache directory".to_string())
    })?;
    Ok(cache_dir.join(APP_NAME).join(LOG_FILE))
}

/// Install the global subscriber writing to `path`.
///
/// Calling this more than once keeps the first subscriber.
pub fn init_logging(verbosity: Verbosity, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let default_filter = format!("{}={}", APP_NAME, verbosity.to_level());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true),
    );

    // ignore error if already set
    let _ = subscriber.try_init();
    Ok(())
}
