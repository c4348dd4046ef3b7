//! Console and file logging for the binaries.

use std::fs::OpenOptions;

use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

use crate::error::Result;
use crate::settings::Settings;

/// Installs the global logger. Messages go to the terminal if `log_to_console` is set and
/// are appended to `log_file` if `log_to_file` is set. Nothing is installed if neither is.
pub fn init(settings: &Settings, level: LevelFilter) -> Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![];

    if settings.log_to_console {
        loggers.push(TermLogger::new(level,
                                     Config::default(),
                                     TerminalMode::Mixed,
                                     ColorChoice::Auto));
    }

    if settings.log_to_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&settings.log_file)?;

        loggers.push(WriteLogger::new(level, Config::default(), file));
    }

    if !loggers.is_empty() {
        CombinedLogger::init(loggers)?;
    }

    Ok(())
}
