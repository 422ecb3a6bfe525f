//! Logging set-up: coloured, timestamped records on stderr.
//!
//! Stdout is reserved for weather output so `--json` stays machine readable.

use std::io::stderr;
use std::time::SystemTime;

use anyhow::{Context, Result};
use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339_seconds;
use log::{LevelFilter, debug};

/// Map the number of `-v` flags to a level filter.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Level for reqwest's own records, never below info.
pub fn reqwest_level_for(verbosity: u8) -> LevelFilter {
    level_for(verbosity).min(LevelFilter::Info)
}

pub fn initialize(verbosity: u8) -> Result<()> {
    let level = level_for(verbosity);

    let colors = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    Dispatch::new()
        .level(level)
        .level_for("hyper", LevelFilter::Warn)
        // reqwest logs full request URLs, which carry the API key, at debug
        .level_for("reqwest", reqwest_level_for(verbosity))
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{target}]",
                date = format_rfc3339_seconds(SystemTime::now()),
                level = colors.color(record.level()),
                message = message,
                target = record.target(),
            ))
        })
        .chain(stderr())
        .apply()
        .context("Failed to initialize logger")?;

    debug!("Logger initialized with level: {level:?}");
    Ok(())
}
