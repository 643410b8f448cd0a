//! Process-wide logging via fern.
//!
//! One dispatch, one line format; the target (stdout or an append-only
//! file) and the level palette are decided up front. File output is
//! always plain since escape codes in log files help nobody.

use crate::error::Result as ServerErrorResult;
use crate::error::ServerError;

use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;

fn palette() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red)
}

/// Install the global logger.
///
/// `log_file = None` logs to stdout; `colored` only applies there.
pub fn initialize(
    log_level: ct_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let colors = (colored && log_file.is_none()).then(palette);

    let dispatch = Dispatch::new()
        .level(log_level.0)
        .format(move |out, message, record| {
            let level = match colors.as_ref() {
                Some(palette) => palette.color(record.level()).to_string(),
                None => record.level().to_string(),
            };
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = humantime::format_rfc3339(SystemTime::now()),
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        });

    let dispatch = match &log_file {
        Some(path) => dispatch.chain(fern::log_file(path)?),
        None => dispatch.chain(std::io::stdout()),
    };

    dispatch.apply().map_err(|e| ServerError::Logger {
        message: format!("Failed to initialize logger: {e}"),
    })?;

    match &log_file {
        Some(path) => info!(
            "Logger initialized: level={:?}, file={}",
            log_level.0,
            path.display()
        ),
        None => info!("Logger initialized: level={:?}, stdout", log_level.0),
    }

    // Bridge tracing to log
    tracing_log::LogTracer::init().ok();

    Ok(())
}
