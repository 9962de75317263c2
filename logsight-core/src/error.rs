use std::path::PathBuf;
use thiserror::Error;

/// Failures that can happen around the analysis engine.
///
/// The engine itself is total over its input; these errors come from reading
/// files and configuration before analysis starts.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read log file {}: {source}", .path.display())]
    Ingestion {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Log file {} is {size} bytes, over the {limit} byte limit", .path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error was raised while ingesting a log file.
    pub fn is_ingestion(&self) -> bool {
        matches!(self, Error::Ingestion { .. } | Error::FileTooLarge { .. })
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
