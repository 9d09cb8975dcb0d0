use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";
const DEFAULT_LOG_FILE: &str = "./logs/tune-duper.log";

/// Where and how verbosely to log, read from `TRACING_LEVEL` and
/// `LOG_FILE_PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub file: PathBuf,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            level: lookup("TRACING_LEVEL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
            file: lookup("LOG_FILE_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }

    /// Directory and file name for the appender; a bare name lands in `.`.
    fn file_parts(&self) -> (PathBuf, OsString) {
        let directory = match self.file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let name = self
            .file
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("tune-duper.log"));
        (directory, name)
    }
}

/// Console layer on stderr (stdout is reserved for `scan --json`) plus a
/// plain-text file layer. Keep the guard alive until exit so the file
/// writer flushes.
pub fn init_logger() -> WorkerGuard {
    let settings = LogSettings::from_env();
    let (directory, name) = settings.file_parts();

    let file_appender = tracing_appender::rolling::never(&directory, Path::new(&name));
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .pretty()
                .with_file(false)
                .without_time()
                .with_ansi(true),
        )
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(false),
        )
        .with(EnvFilter::new(&settings.level))
        .init();

    debug!(
        "Logging at '{}' to stderr and {}",
        settings.level,
        directory.join(&name).display()
    );

    guard
}
