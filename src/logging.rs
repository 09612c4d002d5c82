use chrono::Local;
use log::{LevelFilter, Metadata, Record};
use once_cell::sync::OnceCell;
use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const LOG_FILE: &str = "log.txt";

#[derive(Debug)]
struct FileLogger {
    log_file: PathBuf,
    level: LevelFilter,
}

static LOGGER: OnceCell<FileLogger> = OnceCell::new();

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_entry = format!(
                "[{}] {} - {}\n",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            );
            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.log_file)
            {
                let _ = file.write_all(log_entry.as_bytes());
            }
        }
    }

    fn flush(&self) {}
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Could not create log directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logger already set")]
    AlreadySet,
}

// Install the file logger writing to `<log_dir>/log.txt`. Only the first call wins.
pub fn init(log_dir: &Path, level: LevelFilter) -> Result<(), LoggingError> {
    create_dir_all(log_dir)?;
    let logger = LOGGER.get_or_init(|| FileLogger {
        log_file: log_dir.join(LOG_FILE),
        level,
    });
    log::set_logger(logger).map_err(|_| LoggingError::AlreadySet)?;
    log::set_max_level(level);
    Ok(())
}
