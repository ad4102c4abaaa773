//! Error types for member reads and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// A data member or element could not be read during traversal.
///
/// The engine recovers from these locally: the member is logged and skipped,
/// and the comparison continues with its siblings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadError {
    #[error("value is already mutably borrowed")]
    Borrowed,

    #[error("lock poisoned")]
    Poisoned,

    #[error("lock is held elsewhere")]
    Locked,

    #[error("accessor bound to {expected} was given a different type")]
    TypeMismatch { expected: &'static str },

    #[error("accessor failed: {0}")]
    Accessor(String),
}

impl ReadError {
    /// Convenience constructor for fallible accessors.
    pub fn accessor(message: impl Into<String>) -> Self {
        Self::Accessor(message.into())
    }
}

/// Errors produced while loading comparison configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
