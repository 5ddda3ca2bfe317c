// SPDX-License-Identifier: MIT
//
// Log file for the ked driver.
//
// stdout carries the status line the caller scripts against, so tracing
// never writes there. Events land in `ked.log` under the user log dir with
// UTC timestamps and no colour codes.

use std::path::PathBuf;

use thiserror::Error;
use time::macros::format_description;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;

use crate::paths::user_log_dir;

const LOG_FILE: &str = "ked.log";

/// Filter used when neither `--log-level` nor `RUST_LOG` says otherwise.
const FALLBACK_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot create log dir {}", .path.display())]
    LogDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("bad --log-level {0:?}")]
    Level(String, #[source] tracing_subscriber::filter::ParseError),
    #[error("tracing is already set up")]
    AlreadyInstalled(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Pick the event filter. An explicit `--log-level` must parse; a broken
/// `RUST_LOG` falls back quietly.
fn event_filter(level: Option<&str>) -> Result<EnvFilter, LoggingError> {
    if let Some(level) = level {
        return EnvFilter::try_new(level).map_err(|err| LoggingError::Level(level.into(), err));
    }
    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER)))
}

/// Route tracing into the log file and return its path.
pub fn init(level: Option<&str>) -> Result<PathBuf, LoggingError> {
    let filter = event_filter(level)?;
    let dir = user_log_dir();
    std::fs::create_dir_all(&dir).map_err(|source| LoggingError::LogDir {
        path: dir.clone(),
        source,
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::new(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        )))
        .with_writer(tracing_appender::rolling::never(&dir, LOG_FILE))
        .with_ansi(false)
        .try_init()
        .map_err(LoggingError::AlreadyInstalled)?;

    Ok(dir.join(LOG_FILE))
}
