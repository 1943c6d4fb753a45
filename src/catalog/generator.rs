//! Catalog assembly
//!
//! One linear pass: discover app directories, build each app (metadata,
//! then versions, then files), and serialize the result. A failure inside
//! one app only drops that app; it is logged and reported in
//! [`GenerationReport::skipped`].

use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{debug, error, info, warn};

use super::files::list_release_files;
use super::metadata::{title_case, AppMetadata, README_FILE};
use super::model::{
    AdditionalProperties, AppEntry, Catalog, CatalogExtra, LocalizedDescription, VersionEntry,
    DEFAULT_APP_TYPE, DEFAULT_ARCHITECTURES, DEFAULT_INSTALL_LIMIT, DEFAULT_RECOMMEND,
};
use super::version::{is_version_dir, normalize_version};
use crate::config::{GeneratorConfig, StoreIdentity};
use crate::io::{NamedPath, PathUtils};
use crate::{AppStoreError, Result};

/// Icon guessed for apps that ship no icon file and set none in metadata
pub const DEFAULT_ICON_FILE: &str = "logo.png";

/// An app left out of the catalog because building it failed
#[derive(Debug)]
pub struct SkippedApp {
    pub name: String,
    pub error: AppStoreError,
}

/// Result of one generation pass
#[derive(Debug)]
pub struct GenerationReport {
    pub catalog: Catalog,
    pub skipped: Vec<SkippedApp>,
}

/// Builds the catalog for one configuration and clock reading
#[derive(Debug, Clone)]
pub struct CatalogGenerator {
    config: GeneratorConfig,
    identity: StoreIdentity,
    generated_at: DateTime<Utc>,
}

impl CatalogGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            identity: StoreIdentity::default(),
            generated_at: Utc::now(),
        }
    }

    /// Pin the generation time stamped on the catalog, apps and versions
    pub fn with_timestamp(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn with_identity(mut self, identity: StoreIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the catalog and write it to the configured output file
    pub fn generate(&self) -> Result<GenerationReport> {
        let report = self.build()?;
        self.write(&report.catalog)?;
        info!(
            output = %self.config.output_file.display(),
            apps = report.catalog.apps.len(),
            skipped = report.skipped.len(),
            "Generated catalog"
        );
        Ok(report)
    }

    /// Build the catalog without touching the output file
    pub fn build(&self) -> Result<GenerationReport> {
        self.config.validate()?;

        let mut catalog = self.empty_catalog();
        let mut skipped = Vec::new();

        let apps_dir = &self.config.apps_dir;
        if !apps_dir.exists() {
            warn!(
                apps_dir = %apps_dir.display(),
                "Apps directory not found, generating an empty catalog"
            );
            return Ok(GenerationReport { catalog, skipped });
        }

        for app in PathUtils::list_subdirectories(apps_dir)? {
            info!(app = %app.name, "Processing app");
            match self.build_app(&app.path, &app.name) {
                Ok(entry) => catalog.apps.push(entry),
                Err(e) => {
                    error!(app = %app.name, error = %e, "Failed to process app, skipping");
                    skipped.push(SkippedApp {
                        name: app.name,
                        error: e,
                    });
                }
            }
        }

        Ok(GenerationReport { catalog, skipped })
    }

    /// Serialize and write the catalog, replacing any previous file
    pub fn write(&self, catalog: &Catalog) -> Result<()> {
        let json = catalog.to_json_pretty()?;
        let output = &self.config.output_file;
        std::fs::write(output, json).map_err(|e| AppStoreError::io(output, e))
    }

    /// Build the entry for one app directory
    pub fn build_app(&self, app_dir: &Path, app_name: &str) -> Result<AppEntry> {
        let metadata = AppMetadata::load(app_dir, app_name, &self.config)?;

        let mut version_dirs: Vec<NamedPath> = PathUtils::list_subdirectories(app_dir)?
            .into_iter()
            .filter(|dir| {
                let keep = is_version_dir(&dir.name);
                if !keep {
                    debug!(app = app_name, dir = %dir.name, "Ignoring non-version directory");
                }
                keep
            })
            .collect();
        // Descending by name, not by semantic version
        version_dirs.sort_by(|a, b| b.name.cmp(&a.name));

        let versions = version_dirs
            .iter()
            .map(|dir| self.build_version(app_name, dir))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.assemble_app(app_name, metadata, versions))
    }

    /// Build the entry for one version directory of an app
    pub fn build_version(&self, app_name: &str, version_dir: &NamedPath) -> Result<VersionEntry> {
        let files = list_release_files(&version_dir.path)?;
        let read_me = PathUtils::read_optional(&version_dir.path.join(README_FILE))?;

        Ok(VersionEntry {
            valid: true,
            violations: Vec::new(),
            id: version_dir.name.clone(),
            read_me,
            name: normalize_version(&version_dir.name),
            last_modified: self.timestamp(),
            files,
            download_url: self.config.app_asset_url(app_name, &version_dir.name),
            download_callback_url: self.config.contents_api_url(app_name, &version_dir.name),
        })
    }

    /// Apply metadata overrides on top of the computed defaults
    fn assemble_app(
        &self,
        app_name: &str,
        metadata: AppMetadata,
        versions: Vec<VersionEntry>,
    ) -> AppEntry {
        let AppMetadata {
            name,
            title,
            description,
            descriptions,
            description_zh,
            short_desc_zh,
            short_desc_en,
            tags,
            app_type,
            cross_version_update,
            limit,
            recommend,
            website,
            github,
            document,
            architectures,
            icon,
            read_me,
        } = metadata;

        let titled = title_case(app_name);
        let name = name.unwrap_or_else(|| titled.clone());
        let tags = tags.unwrap_or_default();

        let localized = descriptions.unwrap_or_else(|| LocalizedDescription {
            en: description.clone().unwrap_or_default(),
            zh: description_zh.unwrap_or_default(),
        });
        let short_desc_en = short_desc_en
            .or_else(|| description.clone())
            .unwrap_or_default();

        AppEntry {
            valid: true,
            violations: Vec::new(),
            id: app_name.to_string(),
            last_modified: self.timestamp(),
            icon: icon.unwrap_or_else(|| self.config.app_asset_url(app_name, DEFAULT_ICON_FILE)),
            read_me: read_me
                .unwrap_or_else(|| format!("# {titled}\n\nDescription for {app_name}...")),
            description: description.unwrap_or_else(|| format!("Description for {app_name}")),
            name: name.clone(),
            tags: tags.clone(),
            title: title.unwrap_or_else(|| titled.clone()),
            additional_properties: AdditionalProperties {
                key: app_name.to_string(),
                name,
                tags,
                short_desc_zh: short_desc_zh.unwrap_or_default(),
                short_desc_en,
                description: localized,
                app_type: app_type.unwrap_or_else(|| DEFAULT_APP_TYPE.to_string()),
                cross_version_update: cross_version_update.unwrap_or(true),
                limit: limit.unwrap_or(DEFAULT_INSTALL_LIMIT),
                recommend: recommend.unwrap_or(DEFAULT_RECOMMEND),
                website: website.unwrap_or_default(),
                github: github.unwrap_or_default(),
                document: document.unwrap_or_default(),
                architectures: architectures.unwrap_or_else(|| {
                    DEFAULT_ARCHITECTURES.iter().map(|a| a.to_string()).collect()
                }),
            },
            versions,
        }
    }

    fn empty_catalog(&self) -> Catalog {
        Catalog {
            valid: true,
            violations: Vec::new(),
            id: self.identity.id.clone(),
            icon: self.identity.icon.clone(),
            last_modified: self.timestamp(),
            name: self.identity.name.clone(),
            title: self.identity.title.clone(),
            extra: CatalogExtra {
                version: self.identity.version.clone(),
            },
            apps: Vec::new(),
        }
    }

    fn timestamp(&self) -> i64 {
        self.generated_at.timestamp()
    }
}
