//! File I/O operations for Claude Code settings documents.
//!
//! Settings are handled as raw JSON values here: the fixer must write back
//! exactly what it read, apart from the entries it rewrites.

use std::fs::{self, File, FileTimes};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{Level, instrument, warn};

use crate::error::{Result, SettingsError};

/// Suffix appended to the settings file name when backing it up.
pub const BACKUP_SUFFIX: &str = "backup";

fn read_error(path: &Path, e: std::io::Error) -> SettingsError {
    match e.kind() {
        ErrorKind::NotFound => SettingsError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => SettingsError::PermissionDenied {
            path: path.to_path_buf(),
            source: e,
        },
        _ => SettingsError::ReadError {
            path: path.to_path_buf(),
            source: e,
        },
    }
}

/// Validates and loads a settings document.
///
/// The path must exist, be a regular file, contain UTF-8 text, and parse as
/// JSON. Any violation is reported before anything on disk is touched.
#[instrument(level = Level::TRACE)]
pub fn load_document(path: &Path) -> Result<Value> {
    let metadata = fs::metadata(path).map_err(|e| read_error(path, e))?;
    if !metadata.is_file() {
        return Err(SettingsError::NotAFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| read_error(path, e))?;

    serde_json::from_str(&content).map_err(|e| SettingsError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Writes a settings document as two-space indented JSON, replacing the file.
#[instrument(level = Level::TRACE, skip(document))]
pub fn write_document(path: &Path, document: &Value) -> Result<()> {
    let content = serde_json::to_string_pretty(document)?;

    fs::write(path, content).map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => SettingsError::PermissionDenied {
            path: path.to_path_buf(),
            source: e,
        },
        _ => SettingsError::WriteError {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

/// Computes the backup path for a given path and suffix.
///
/// For `path/to/settings.json` with suffix `backup`, returns
/// `path/to/settings.json.backup`.
pub fn backup_path_for(path: &Path, suffix: &str) -> PathBuf {
    let mut backup_path = path.as_os_str().to_owned();
    backup_path.push(".");
    backup_path.push(suffix);
    PathBuf::from(backup_path)
}

/// Backs up a settings file by copying it to `{path}.{suffix}`.
///
/// An existing backup with the same name is overwritten. The source's access
/// and modification times are carried over when the platform allows it.
#[instrument(level = Level::TRACE)]
pub fn backup_settings_file(path: &Path, suffix: &str) -> Result<PathBuf> {
    let backup_path = backup_path_for(path, suffix);

    fs::copy(path, &backup_path).map_err(|e| SettingsError::BackupError {
        path: backup_path.clone(),
        source: e,
    })?;

    if let Err(e) = copy_times(path, &backup_path) {
        warn!(error = %e, backup = %backup_path.display(), "could not preserve backup timestamps");
    }

    Ok(backup_path)
}

fn copy_times(from: &Path, to: &Path) -> std::io::Result<()> {
    let metadata = fs::metadata(from)?;
    let times = FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);
    File::options().write(true).open(to)?.set_times(times)
}

/// Removes a backup file created by [`backup_settings_file`].
///
/// A backup that is already gone is not an error.
#[instrument(level = Level::TRACE)]
pub fn remove_backup(backup_path: &Path) -> Result<()> {
    match fs::remove_file(backup_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SettingsError::BackupError {
            path: backup_path.to_path_buf(),
            source: e,
        }),
    }
}
