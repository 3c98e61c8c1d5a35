//! Error types for worldprotect
//!
//! Resource failures are returned as errors. Content problems inside a
//! blacklist file are never fatal and are reported as [`ParseWarning`]s.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read the blacklist resource
#[derive(Debug, Error)]
pub enum LoadError {
    /// The blacklist file does not exist
    #[error("blacklist file {} does not exist", path.display())]
    NotFound { path: PathBuf },

    /// The blacklist file exists but could not be read
    #[error("could not read blacklist file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Classify an I/O error raised while reading `path`
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound { path }
        } else {
            LoadError::Io { path, source }
        }
    }
}

/// Failure to load the service configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure to load an item name table
#[derive(Debug, Error)]
pub enum ItemTableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid item table: {0}")]
    Parse(#[from] toml::de::Error),

    /// Id 0 means "no such item" and cannot be assigned to a name
    #[error("item '{name}' cannot use reserved id 0")]
    ReservedId { name: String },
}

/// A recoverable problem found while parsing a blacklist
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWarning {
    /// A section header named an item that could not be resolved
    #[error("line {line}: unknown block name '{token}'")]
    UnknownItem { line: usize, token: String },

    /// An option line used an unrecognized key
    #[error("line {line}: unknown option '{key}'")]
    UnknownOption { line: usize, key: String },

    /// An option line had no value
    #[error("line {line}: option with no value '{text}'")]
    MissingValue { line: usize, text: String },

    /// A non-comment line appeared before any section header
    #[error("line {line}: option with no heading '{text}'")]
    NoSection { line: usize, text: String },
}

impl ParseWarning {
    /// 1-based line number the warning refers to
    pub fn line(&self) -> usize {
        match self {
            ParseWarning::UnknownItem { line, .. }
            | ParseWarning::UnknownOption { line, .. }
            | ParseWarning::MissingValue { line, .. }
            | ParseWarning::NoSection { line, .. } => *line,
        }
    }
}
