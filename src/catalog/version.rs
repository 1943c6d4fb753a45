//! Version directory naming

use once_cell::sync::Lazy;
use regex::Regex;

use crate::io::PathUtils;

/// At least two numeric components, optionally prefixed with `v`
static VERSION_DIR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^v?\d+[-._]\d+").expect("version pattern is valid"));

/// Channel names accepted as versions regardless of the pattern
pub const CHANNEL_NAMES: &[&str] = &["latest", "stable"];

/// Whether a subdirectory of an app holds a release
pub fn is_version_dir(name: &str) -> bool {
    if PathUtils::is_hidden(name) {
        return false;
    }
    VERSION_DIR_PATTERN.is_match(name) || CHANNEL_NAMES.contains(&name)
}

/// Display form of a version directory name (`1-26-0` -> `1.26.0`).
///
/// Only one separator family is replaced: dashes if there are any,
/// otherwise underscores.
pub fn normalize_version(dir_name: &str) -> String {
    if dir_name.contains('-') {
        dir_name.replace('-', ".")
    } else if dir_name.contains('_') {
        dir_name.replace('_', ".")
    } else {
        dir_name.to_string()
    }
}
