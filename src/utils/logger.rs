//! Logging utilities

use crate::Result;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize logging: human-readable console output on stderr plus a
/// daily-rolling JSON log file. `filter` takes `EnvFilter` directives;
/// `RUST_LOG` takes precedence over it.
pub fn init<P: AsRef<Path>>(filter: &str, log_file: P) -> Result<()> {
    let log_file = log_file.as_ref();
    let directory = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(directory)?;

    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        directory,
        log_file.file_name().unwrap_or(std::ffi::OsStr::new("surebet.log")),
    );

    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

/// Log a surebet with structured fields
#[macro_export]
macro_rules! log_surebet {
    ($level:ident, $sport:expr, $event:expr, $line:expr, $roi:expr, $($field:tt)*) => {
        tracing::$level!(
            sport = %$sport,
            event = %$event,
            line = %$line,
            roi_pct = %$roi,
            $($field)*
        );
    };
}

/// Log a league retrieval with structured fields
#[macro_export]
macro_rules! log_retrieval {
    ($level:ident, $sport:expr, $events:expr, $($field:tt)*) => {
        tracing::$level!(
            sport = %$sport,
            events = $events,
            $($field)*
        );
    };
}
