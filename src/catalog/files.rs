//! Release file listing for a version directory

use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::SystemTime;
use tracing::debug;

use super::model::FileEntry;
use crate::io::PathUtils;
use crate::{AppStoreError, Result};

/// Millisecond field and offset are fixed literals
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000+00:00";

/// Render a modification time in UTC
pub fn format_file_timestamp(modified: SystemTime) -> String {
    DateTime::<Utc>::from(modified)
        .format(FILE_TIMESTAMP_FORMAT)
        .to_string()
}

/// Visible files directly inside a version directory, sorted by name
pub fn list_release_files(version_dir: &Path) -> Result<Vec<FileEntry>> {
    PathUtils::list_files(version_dir)?
        .into_iter()
        .map(|file| {
            let metadata =
                std::fs::metadata(&file.path).map_err(|e| AppStoreError::io(&file.path, e))?;
            let modified = metadata
                .modified()
                .map_err(|e| AppStoreError::io(&file.path, e))?;

            debug!(file = %file.name, size = metadata.len(), "Found release file");
            Ok(FileEntry {
                name: file.name,
                size: metadata.len(),
                last_modified: format_file_timestamp(modified),
            })
        })
        .collect()
}
