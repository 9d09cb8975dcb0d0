use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Error processing filenames: {0}")]
    Grouping(String),

    #[error("Worker error: {0}")]
    Worker(String),
}
