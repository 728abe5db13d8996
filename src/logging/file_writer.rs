//! Dated log file layout and creation
//!
//! Each initialization gets its own file:
//! `{base}/{YYYY-MM-DD}/{YYYY-MM-DDTHH-MM-SS}.txt`, named from the UTC clock.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::RouterError;

/// Information about the current log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileInfo {
    /// Dated directory holding the file
    pub dir: PathBuf,
    /// Full path to the log file
    pub path: PathBuf,
}

/// Compute the directory and file path for a run started at `now`
pub fn log_file_paths(base_dir: &Path, now: DateTime<Utc>) -> LogFileInfo {
    let dir = base_dir.join(now.format("%Y-%m-%d").to_string());
    let file_name = format!("{}.txt", now.format("%Y-%m-%dT%H-%M-%S")).replace(' ', "-");
    let path = dir.join(file_name);
    LogFileInfo { dir, path }
}

/// Create the dated directory and a fresh (truncated) log file
///
/// Two calls within the same second resolve to the same path; the second truncates.
pub fn create_log_file(
    base_dir: &Path,
    now: DateTime<Utc>,
) -> Result<(LogFileInfo, File), RouterError> {
    let info = log_file_paths(base_dir, now);

    fs::create_dir_all(&info.dir).map_err(|source| RouterError::DirectoryCreation {
        path: info.dir.clone(),
        source,
    })?;

    let file = File::create(&info.path).map_err(|source| RouterError::FileCreation {
        path: info.path.clone(),
        source,
    })?;

    Ok((info, file))
}
