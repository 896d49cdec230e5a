use crate::error::{Result as ServerErrorResult, ServerError};

use std::fmt;
use std::fs::{File, OpenOptions};
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use error_location::ErrorLocation;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{Level, LevelFilter, Record, info};

/// Crates whose per-connection chatter is capped at `Warn`
const QUIET_TARGETS: [&str; 3] = ["hyper", "h2", "tower_http"];

/// Where log lines are written
pub(crate) enum Sink {
    File(File),
    ColoredStdout,
    PlainStdout,
}

impl Sink {
    /// A log file wins over `colored`; files never get escape codes.
    #[track_caller]
    pub(crate) fn open(log_file: Option<&Path>, colored: bool) -> ServerErrorResult<Self> {
        match log_file {
            Some(path) => OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map(Sink::File)
                .map_err(|e| ServerError::Logger {
                    message: format!("Failed to open log file {}: {e}", path.display()),
                    location: ErrorLocation::from(Location::caller()),
                }),
            None if colored => Ok(Sink::ColoredStdout),
            None => Ok(Sink::PlainStdout),
        }
    }
}

/// Install the global fern logger.
///
/// Lines look like `[2026-01-01T00:00:00Z INFO  hub::dispatcher] subscriber connected client_1`;
/// warnings and errors also carry their `[file:line]`.
#[track_caller]
pub fn initialize(
    log_level: ops_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = log_level.0;
    let sink = Sink::open(log_file.as_deref(), colored)?;

    let mut dispatch = Dispatch::new().level(level_filter);
    for target in QUIET_TARGETS {
        dispatch = dispatch.level_for(target, level_filter.min(LevelFilter::Warn));
    }

    let dispatch = match sink {
        Sink::File(file) => dispatch
            .format(|out, message, record| {
                out.finish(format_args!("{}", format_line(now(), record.level(), *message, record)))
            })
            .chain(file),
        Sink::ColoredStdout => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);
            dispatch
                .format(move |out, message, record| {
                    let level = colors.color(record.level());
                    out.finish(format_args!("{}", format_line(now(), level, *message, record)))
                })
                .chain(std::io::stdout())
        }
        Sink::PlainStdout => dispatch
            .format(|out, message, record| {
                out.finish(format_args!("{}", format_line(now(), record.level(), *message, record)))
            })
            .chain(std::io::stdout()),
    };

    dispatch.apply().map_err(|e| ServerError::Logger {
        message: format!("Failed to initialize logger: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    match log_file {
        Some(path) => info!("Logger initialized: level={level_filter}, file={}", path.display()),
        None => info!("Logger initialized: level={level_filter}, stdout"),
    }

    Ok(())
}

fn now() -> humantime::Rfc3339Timestamp {
    humantime::format_rfc3339_seconds(SystemTime::now())
}

pub(crate) fn format_line(
    date: impl fmt::Display,
    level: impl fmt::Display,
    message: fmt::Arguments<'_>,
    record: &Record<'_>,
) -> String {
    let mut line = format!(
        "[{date} {level:<5} {}] {message}",
        component(record.target())
    );
    if record.level() <= Level::Warn {
        line.push_str(&format!(
            " [{}:{}]",
            record.file().unwrap_or("unknown"),
            record.line().unwrap_or(0)
        ));
    }
    line
}

/// `ops_hub::dispatcher` -> `hub::dispatcher`; other targets untouched
pub(crate) fn component(target: &str) -> &str {
    target.strip_prefix("ops_").unwrap_or(target)
}
