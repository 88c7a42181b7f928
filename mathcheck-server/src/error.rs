//! Errors of the service itself, as opposed to the analysis errors reported to clients.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The configuration could not be read or extracted.
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    /// The configuration file given on the command line does not exist.
    #[error("configuration file `{}` does not exist", .0.display())]
    MissingConfig(PathBuf),

    /// A configuration value is out of range.
    #[error("invalid configuration value for `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },

    /// The listening socket could not be opened.
    #[error("failed to listen on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A worker thread could not be spawned.
    #[error("failed to spawn a worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// A worker thread panicked.
    #[error("worker thread `{0}` panicked")]
    WorkerPanicked(String),
}
