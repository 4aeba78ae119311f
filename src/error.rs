//! Error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unrepresentable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name}={hours} hours does not fit in seconds")]
    TtlOverflow { name: &'static str, hours: u64 },

    #[error("check interval must be a positive number of seconds")]
    ZeroInterval,

    #[error("failed to load env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

/// Failure on a single tree entry. Always absorbed into the sweep's error
/// counter; never aborts a sweep.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("failed to stat {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to delete {}: {source}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to enumerate entry: {0}")]
    Walk(#[from] walkdir::Error),
}
