//! Generator configuration
//!
//! Everything that used to be ambient process state (the repository the
//! catalog is published from, where apps live, where the catalog goes) is
//! collected here and passed to the generator explicitly.

use crate::{AppStoreError, Result};
use std::path::PathBuf;

/// Environment variable GitHub Actions sets to `owner/repo`
pub const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";

/// Repository used when nothing else is configured
pub const DEFAULT_REPOSITORY: &str = "yourusername/appstore";

/// Branch served by the raw-content mirror
pub const DEFAULT_BRANCH: &str = "main";

pub const DEFAULT_APPS_DIR: &str = "apps";
pub const DEFAULT_OUTPUT_FILE: &str = "appstore.json";

const RAW_CONTENT_HOST: &str = "https://raw.githubusercontent.com";
const CONTENTS_API_HOST: &str = "https://api.github.com/repos";

/// Settings for one generation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Repository identifier in `owner/repo` form
    pub repository: String,

    /// Branch used in raw-content download URLs
    pub branch: String,

    /// Root directory holding one subdirectory per app
    pub apps_dir: PathBuf,

    /// Where the catalog is written
    pub output_file: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REPOSITORY)
    }
}

impl GeneratorConfig {
    /// Create a config for a repository with default paths and branch
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            branch: DEFAULT_BRANCH.to_string(),
            apps_dir: PathBuf::from(DEFAULT_APPS_DIR),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }

    /// Create a config whose repository comes from `GITHUB_REPOSITORY`
    pub fn from_env() -> Self {
        Self::new(resolve_repository(
            None,
            std::env::var(REPOSITORY_ENV).ok(),
        ))
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_apps_dir(mut self, apps_dir: impl Into<PathBuf>) -> Self {
        self.apps_dir = apps_dir.into();
        self
    }

    pub fn with_output_file(mut self, output_file: impl Into<PathBuf>) -> Self {
        self.output_file = output_file.into();
        self
    }

    /// Reject settings that would produce malformed URLs
    pub fn validate(&self) -> Result<()> {
        if self.repository.trim().is_empty() {
            return Err(AppStoreError::Config(
                "repository identifier must not be empty".to_string(),
            ));
        }
        if self.branch.trim().is_empty() {
            return Err(AppStoreError::Config(
                "branch must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL of the raw-content mirror, e.g.
    /// `https://raw.githubusercontent.com/owner/repo/main`
    pub fn raw_base_url(&self) -> String {
        format!("{}/{}/{}", RAW_CONTENT_HOST, self.repository, self.branch)
    }

    /// Raw-content URL of a file or directory inside an app
    pub fn app_asset_url(&self, app: &str, entry: &str) -> String {
        format!("{}/apps/{}/{}", self.raw_base_url(), app, entry)
    }

    /// Contents API URL notified after a version is downloaded
    pub fn contents_api_url(&self, app: &str, version: &str) -> String {
        format!(
            "{}/{}/contents/apps/{}/{}",
            CONTENTS_API_HOST, self.repository, app, version
        )
    }
}

/// Pick the repository: explicit flag, then environment, then the default.
/// Empty values count as absent.
pub fn resolve_repository(flag: Option<String>, env: Option<String>) -> String {
    flag.into_iter()
        .chain(env)
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_REPOSITORY.to_string())
}

/// Fixed identity of the published store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreIdentity {
    pub id: String,
    pub icon: String,
    pub name: String,
    pub title: String,
    pub version: String,
}

impl Default for StoreIdentity {
    fn default() -> Self {
        Self {
            id: "corapanel".to_string(),
            icon: "https://cdn-icons-png.flaticon.com/512/4187/4187336.png".to_string(),
            name: "CoraPANEL".to_string(),
            title: "Official Appstore for CoraPANEL".to_string(),
            version: "v1.0.0".to_string(),
        }
    }
}
