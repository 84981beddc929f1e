//! Error types for the Claude settings library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading, backing up, or writing a settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file not found.
    #[error("settings file does not exist: {0}")]
    NotFound(PathBuf),

    /// The path exists but is a directory, socket, or similar.
    #[error("path is not a file: {0}")]
    NotAFile(PathBuf),

    /// Permission denied when accessing settings.
    #[error("permission denied accessing settings at {path}: {source}")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read settings file.
    #[error("failed to read settings from {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse settings JSON.
    #[error("invalid JSON in file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write settings file.
    #[error("failed to write settings to {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or remove a backup copy.
    #[error("failed to manage backup at {path}: {source}")]
    BackupError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize settings to JSON.
    #[error("failed to serialize settings: {0}")]
    SerializeError(#[from] serde_json::Error),
}

impl SettingsError {
    /// An actionable suggestion for the operator, if one applies.
    pub fn help(&self) -> Option<String> {
        match self {
            SettingsError::NotFound(_) => {
                Some("check the path; user settings usually live at ~/.claude/settings.json".into())
            }
            SettingsError::NotAFile(_) => {
                Some("pass the settings.json file itself, not its directory".into())
            }
            SettingsError::PermissionDenied { path, .. } => Some(format!(
                "make sure you can read and write {}",
                path.display()
            )),
            SettingsError::ParseError { .. } => {
                Some("fix the JSON syntax error and run again; nothing was changed".into())
            }
            _ => None,
        }
    }
}

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
