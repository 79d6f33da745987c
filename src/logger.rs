//! Logging setup.
//!
//! Everything in the crate logs through the `log` facade; this module wires
//! the facade to a `fern` dispatcher according to the `[logging]` section.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;

use crate::config::LoggingConfig;

/// Install the global logger. Does nothing when logging is disabled.
///
/// Returns an error if a logger was already installed in this process.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let dispatch = dispatch(config.level_filter()?);
    let dispatch = match &config.file {
        Some(path) => dispatch.chain(open_log_file(path)?),
        None => dispatch.chain(std::io::stderr()),
    };

    dispatch.apply().context("Failed to install logger")?;
    Ok(())
}

/// Dispatcher with the application's line format and noise filters, without an output.
pub fn dispatch(level: LevelFilter) -> fern::Dispatch {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("sqlx", LevelFilter::Warn)
        .level_for("sea_orm", LevelFilter::Warn)
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))
}
