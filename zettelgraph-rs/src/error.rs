//! Error types and exit codes for zettelgraph.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOTE_NOT_FOUND: i32 = 2;
    pub const INVALID_PATH: i32 = 6;
}

/// Main error type for zettelgraph operations.
#[derive(Error, Debug)]
pub enum ZettelError {
    #[error("Note not found: {0}")]
    NoteNotFound(PathBuf),

    #[error("Path {path} is outside the note collection at {root}")]
    InvalidPath { path: PathBuf, root: PathBuf },

    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialize error: {0}")]
    YamlSerialize(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("{0}")]
    Other(String),
}

impl ZettelError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ZettelError::NoteNotFound(_) => ExitCode::NoteNotFound,
            ZettelError::InvalidPath { .. } => ExitCode::InvalidPath,
            _ => ExitCode::GeneralError,
        }
    }

    /// Whether this error means the requested note simply does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            ZettelError::NoteNotFound(_) => true,
            ZettelError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Result type alias for zettelgraph operations.
pub type Result<T> = std::result::Result<T, ZettelError>;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    GeneralError,
    NoteNotFound,
    InvalidPath,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::GeneralError => exit_code::GENERAL_ERROR,
            ExitCode::NoteNotFound => exit_code::NOTE_NOT_FOUND,
            ExitCode::InvalidPath => exit_code::INVALID_PATH,
        }
    }
}
