use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;
use log::{Level, Metadata, Record, SetLoggerError};
use owo_colors::OwoColorize;

struct SimpleLogger {
    max_level: Level,
}

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let level = match record.level() {
                Level::Error => record.level().red().to_string(),
                Level::Warn => record.level().yellow().to_string(),
                Level::Info => record.level().blue().to_string(),
                _ => record.level().dimmed().to_string(),
            };
            println!("{} - {}", level, record.args());
        }
    }

    fn flush(&self) {}
}

/// Installs the global logger and returns the [`MultiProgress`] that
/// progress bars must attach to so they don't clobber log lines.
///
/// `verbose` raises the level from `Info` to `Debug`.
pub fn init(verbose: bool) -> Result<MultiProgress, SetLoggerError> {
    let max_level = if verbose { Level::Debug } else { Level::Info };
    let multi = MultiProgress::new();
    LogWrapper::new(multi.clone(), SimpleLogger { max_level }).try_init()?;
    Ok(multi)
}
