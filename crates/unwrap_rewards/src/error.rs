//! # Reward Error Types
//!
//! Errors that can occur at the configuration boundary.
//!
//! Reward resolution itself has no error path: unknown triggers, zero total
//! weight and degenerate quantity ranges all resolve to "no grant".

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or saving reward configuration.
#[derive(Error, Debug)]
pub enum RewardsError {
    /// Reading or writing the configuration file failed.
    #[error("io error on {path:?}: {source}")]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or written.
    #[error("invalid json configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML document could not be parsed.
    #[error("invalid toml configuration: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A configuration could not be written as TOML.
    #[error("failed to serialize toml configuration: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// The file extension is neither `.json` nor `.toml`.
    #[error("unsupported configuration format: {0:?}")]
    UnsupportedFormat(PathBuf),

    /// The version stamp is not `major.minor.patch`.
    #[error("invalid configuration version: {0:?}")]
    InvalidVersion(String),
}

/// Result type for reward configuration operations.
pub type RewardsResult<T> = Result<T, RewardsError>;
