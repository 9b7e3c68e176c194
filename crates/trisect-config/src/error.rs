//! Error types for preset handling.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which filesystem step failed while handling a preset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    /// Reading a preset file
    Read,
    /// Writing a preset file
    Write,
    /// Creating the directory a preset is saved into
    CreateDir,
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileOp::Read => "read",
            FileOp::Write => "write",
            FileOp::CreateDir => "create directory",
        })
    }
}

/// Errors from loading, saving or resolving presets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A filesystem operation on a preset path failed
    #[error("failed to {op} '{path}': {source}")]
    File {
        /// The step that failed.
        op: FileOp,
        /// Path involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Preset text is not valid TOML or has the wrong shape
    #[error("invalid preset TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Preset could not be rendered to TOML
    #[error("cannot serialize preset: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Neither a factory preset nor a readable file
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// Preset content is invalid
    #[error("validation failed: {0}")]
    Validation(#[from] crate::validation::ValidationError),
}

impl ConfigError {
    /// Wrap an I/O error with the failing step and path.
    pub fn file(op: FileOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::File {
            op,
            path: path.into(),
            source,
        }
    }
}
