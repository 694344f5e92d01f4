//! # CLI Error Type
//!
//! Everything that can end a command with a non-zero exit code.
//!
//! ```text
//! config file unreadable / malformed ──► CliError::Config*
//! initialize() failed               ──► CliError::Db        (fatal)
//! store action set `error`          ──► CliError::Action    (message already user-facing)
//! bad flag combination              ──► CliError::InvalidArgument
//! ```

use std::path::PathBuf;

use dindin_db::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Cannot read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cannot create data directory {}: {source}", path.display())]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Database could not be opened or prepared.
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    /// A store action failed; the message is the store's `error` text.
    #[error("{0}")]
    Action(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Cannot encode output: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
