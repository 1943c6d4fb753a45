use crate::{AppStoreError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A directory entry with its name already decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedPath {
    pub name: String,
    pub path: PathBuf,
}

/// Utilities for working with paths
pub struct PathUtils;

impl PathUtils {
    /// Dotfiles and dot-directories are never part of the catalog
    pub fn is_hidden(name: &str) -> bool {
        name.starts_with('.')
    }

    /// Visible subdirectories of `dir`, sorted by name ascending.
    /// Symlinks to directories count as directories.
    pub fn list_subdirectories(dir: &Path) -> Result<Vec<NamedPath>> {
        Self::list_visible(dir, |path| path.is_dir())
    }

    /// Visible regular files directly inside `dir`, sorted by name ascending
    pub fn list_files(dir: &Path) -> Result<Vec<NamedPath>> {
        Self::list_visible(dir, |path| path.is_file())
    }

    /// First candidate (in the given order) that exists in `dir`
    pub fn first_existing<'a>(dir: &Path, candidates: &[&'a str]) -> Option<&'a str> {
        candidates
            .iter()
            .copied()
            .find(|candidate| dir.join(candidate).exists())
    }

    /// Read a file that may legitimately be missing. Anything present at
    /// `path` that cannot be read as text, a directory included, is an error.
    pub fn read_optional(path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(path)
            .map(Some)
            .map_err(|e| AppStoreError::io(path, e))
    }

    fn list_visible(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<NamedPath>> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(dir).map_err(|e| AppStoreError::io(dir, e))? {
            let entry = entry.map_err(|e| AppStoreError::io(dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if Self::is_hidden(&name) {
                continue;
            }

            let path = entry.path();
            if keep(&path) {
                entries.push(NamedPath { name, path });
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
