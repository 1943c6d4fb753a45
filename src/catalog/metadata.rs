//! Per-app metadata overrides (metadata.yml / metadata.json)
//!
//! Every field is optional. A missing field falls back to a computed default
//! when the app entry is assembled. Scalars are coerced to the field's type
//! (see [`super::scalar`]); a collection where a scalar belongs, or a value
//! that cannot be coerced, is a parse error and fails the whole app.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use super::model::LocalizedDescription;
use super::scalar;
use crate::config::GeneratorConfig;
use crate::io::PathUtils;
use crate::{AppStoreError, Result};

pub const METADATA_YAML: &str = "metadata.yml";
pub const METADATA_JSON: &str = "metadata.json";
pub const README_FILE: &str = "README.md";

/// Icon file names, in preference order
pub const ICON_CANDIDATES: &[&str] = &["logo.png", "icon.png", "logo.svg", "icon.svg"];

/// Optional overrides for an app entry
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppMetadata {
    #[serde(default, deserialize_with = "scalar::optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional_string")]
    pub description: Option<String>,

    /// Full localized description block; wins over `description` /
    /// `descriptionZh` in the additional properties
    pub descriptions: Option<LocalizedDescription>,
    #[serde(default, deserialize_with = "scalar::optional_string")]
    pub description_zh: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional_string")]
    pub short_desc_zh: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional_string")]
    pub short_desc_en: Option<String>,

    #[serde(default, deserialize_with = "scalar::optional_string_list")]
    pub tags: Option<Vec<String>>,

    #[serde(rename = "type", default, deserialize_with = "scalar::optional_string")]
    pub app_type: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional_bool")]
    pub cross_version_update: Option<bool>,
    #[serde(default, deserialize_with = "scalar::optional_int")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "scalar::optional_int")]
    pub recommend: Option<i64>,

    #[serde(default, deserialize_with = "scalar::optional_string")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional_string")]
    pub github: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional_string")]
    pub document: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional_string_list")]
    pub architectures: Option<Vec<String>>,

    /// Icon URL; replaced by a discovered icon file
    #[serde(default, deserialize_with = "scalar::optional_string")]
    pub icon: Option<String>,

    /// README text; replaced by the app's README.md
    #[serde(default, deserialize_with = "scalar::optional_string")]
    pub read_me: Option<String>,
}

impl AppMetadata {
    /// Parse YAML metadata. An empty document means no overrides.
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml_ng::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(content)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_value(value)
    }

    /// Parse JSON metadata. A `null` document means no overrides.
    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        let metadata: Option<Self> = serde_json::from_str(content)?;
        Ok(metadata.unwrap_or_default())
    }

    /// Load the overrides for one app directory.
    ///
    /// `metadata.yml` is read if present, otherwise `metadata.json`; the two
    /// are never merged. `README.md` and the first matching icon file then
    /// replace `readMe` and `icon`.
    pub fn load(app_dir: &Path, app_name: &str, config: &GeneratorConfig) -> Result<Self> {
        let mut metadata = Self::read_metadata_file(app_dir)?;

        if let Some(readme) = PathUtils::read_optional(&app_dir.join(README_FILE))? {
            metadata.read_me = Some(readme);
        }

        if let Some(icon) = PathUtils::first_existing(app_dir, ICON_CANDIDATES) {
            debug!(app = app_name, icon, "Found icon file");
            metadata.icon = Some(config.app_asset_url(app_name, icon));
        }

        Ok(metadata)
    }

    fn read_metadata_file(app_dir: &Path) -> Result<Self> {
        let yaml_path = app_dir.join(METADATA_YAML);
        if yaml_path.exists() {
            let content = std::fs::read_to_string(&yaml_path)
                .map_err(|e| AppStoreError::io(&yaml_path, e))?;
            return Self::from_yaml(&content).map_err(|source| AppStoreError::YamlMetadata {
                path: yaml_path,
                source,
            });
        }

        let json_path = app_dir.join(METADATA_JSON);
        if json_path.exists() {
            let content = std::fs::read_to_string(&json_path)
                .map_err(|e| AppStoreError::io(&json_path, e))?;
            return Self::from_json(&content).map_err(|source| AppStoreError::JsonMetadata {
                path: json_path,
                source,
            });
        }

        Ok(Self::default())
    }
}

/// Title-case a directory name: the first cased character of every run is
/// upper-cased and the rest of the run lower-cased. Anything uncased (digits,
/// punctuation, ideographs) ends a run, so `app2go` becomes `App2Go`.
pub fn title_case(name: &str) -> String {
    let mut titled = String::with_capacity(name.len());
    let mut previous_cased = false;

    for c in name.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased && previous_cased {
            titled.extend(c.to_lowercase());
        } else if cased {
            titled.extend(c.to_uppercase());
        } else {
            titled.push(c);
        }
        previous_cased = cased;
    }

    titled
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("nginx"), "Nginx");
        assert_eq!(title_case("my-app"), "My-App");
        assert_eq!(title_case("home_assistant"), "Home_Assistant");
        assert_eq!(title_case("app2go"), "App2Go");
        assert_eq!(title_case("MySQL"), "Mysql");
        assert_eq!(title_case("123"), "123");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
name: Nginx Web Server
title: Nginx
description: High performance web server
descriptions:
  en: English text
  zh: 中文
shortDescZh: 网页服务器
shortDescEn: Web server
tags: [web, proxy]
type: website
crossVersionUpdate: false
limit: 0
recommend: 5
website: https://nginx.org
github: https://github.com/nginx/nginx
document: https://nginx.org/en/docs/
architectures: [amd64]
unknownKey: ignored
"#;

        let metadata = AppMetadata::from_yaml(yaml).unwrap();
        assert_eq!(metadata.name.as_deref(), Some("Nginx Web Server"));
        assert_eq!(metadata.app_type.as_deref(), Some("website"));
        assert_eq!(metadata.cross_version_update, Some(false));
        assert_eq!(metadata.limit, Some(0));
        assert_eq!(metadata.recommend, Some(5));
        assert_eq!(
            metadata.descriptions,
            Some(LocalizedDescription {
                en: "English text".to_string(),
                zh: "中文".to_string(),
            })
        );
        assert_eq!(
            metadata.tags,
            Some(vec!["web".to_string(), "proxy".to_string()])
        );
        assert_eq!(metadata.architectures, Some(vec!["amd64".to_string()]));
    }

    #[test]
    fn test_empty_yaml_means_no_overrides() {
        assert_eq!(AppMetadata::from_yaml("").unwrap(), AppMetadata::default());
        assert_eq!(AppMetadata::from_yaml("   \n").unwrap(), AppMetadata::default());
        assert_eq!(AppMetadata::from_yaml("~").unwrap(), AppMetadata::default());
    }

    #[test]
    fn test_yaml_collections_in_scalar_fields_are_errors() {
        assert!(AppMetadata::from_yaml("tags: {a: 1}").is_err());
        assert!(AppMetadata::from_yaml("name: {first: a}").is_err());
        assert!(AppMetadata::from_yaml("limit: lots").is_err());
        assert!(AppMetadata::from_yaml("name: [unclosed").is_err());
    }

    #[test]
    fn test_yaml_11_scalars_are_coerced() {
        let metadata = AppMetadata::from_yaml(
            "name: 2048\ncrossVersionUpdate: no\nlimit: 1.0\ntags: game\ntitle: yes\n",
        )
        .unwrap();

        assert_eq!(metadata.name.as_deref(), Some("2048"));
        assert_eq!(metadata.cross_version_update, Some(false));
        assert_eq!(metadata.limit, Some(1));
        assert_eq!(metadata.tags, Some(vec!["game".to_string()]));
        assert_eq!(metadata.title.as_deref(), Some("yes"));

        let metadata = AppMetadata::from_yaml("crossVersionUpdate: On\n").unwrap();
        assert_eq!(metadata.cross_version_update, Some(true));
    }

    #[test]
    fn test_parse_json() {
        let metadata =
            AppMetadata::from_json(r#"{"title": "Redis", "descriptionZh": "缓存"}"#).unwrap();
        assert_eq!(metadata.title.as_deref(), Some("Redis"));
        assert_eq!(metadata.description_zh.as_deref(), Some("缓存"));

        assert_eq!(AppMetadata::from_json("null").unwrap(), AppMetadata::default());
        assert!(AppMetadata::from_json("{").is_err());
    }

    #[test]
    fn test_partial_descriptions_default_to_empty() {
        let metadata = AppMetadata::from_yaml("descriptions:\n  en: only english\n").unwrap();
        assert_eq!(
            metadata.descriptions,
            Some(LocalizedDescription {
                en: "only english".to_string(),
                zh: String::new(),
            })
        );
    }

    #[test]
    fn test_load_prefers_yaml_over_json() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(METADATA_YAML), "title: From YAML\n").unwrap();
        fs::write(
            temp.path().join(METADATA_JSON),
            r#"{"title": "From JSON", "tags": ["json"]}"#,
        )
        .unwrap();

        let config = GeneratorConfig::new("owner/repo");
        let metadata = AppMetadata::load(temp.path(), "demo", &config).unwrap();
        assert_eq!(metadata.title.as_deref(), Some("From YAML"));
        assert_eq!(metadata.tags, None);
    }

    #[test]
    fn test_load_readme_and_icon_override_metadata() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(METADATA_JSON),
            r#"{"readMe": "from metadata", "icon": "https://example.com/i.png"}"#,
        )
        .unwrap();
        fs::write(temp.path().join(README_FILE), "# Demo\n").unwrap();
        fs::write(temp.path().join("icon.svg"), "<svg/>").unwrap();
        fs::write(temp.path().join("icon.png"), "png").unwrap();

        let config = GeneratorConfig::new("owner/repo");
        let metadata = AppMetadata::load(temp.path(), "demo", &config).unwrap();
        assert_eq!(metadata.read_me.as_deref(), Some("# Demo\n"));
        assert_eq!(
            metadata.icon.as_deref(),
            Some("https://raw.githubusercontent.com/owner/repo/main/apps/demo/icon.png")
        );
    }

    #[test]
    fn test_load_keeps_metadata_icon_without_icon_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(METADATA_YAML), "icon: https://cdn.example/x.png\n").unwrap();
        fs::write(temp.path().join("logo.jpg"), "not a candidate").unwrap();

        let config = GeneratorConfig::new("owner/repo");
        let metadata = AppMetadata::load(temp.path(), "demo", &config).unwrap();
        assert_eq!(metadata.icon.as_deref(), Some("https://cdn.example/x.png"));
    }

    #[test]
    fn test_load_malformed_yaml_reports_path() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(METADATA_YAML), "name: [unclosed\n").unwrap();

        let config = GeneratorConfig::new("owner/repo");
        let err = AppMetadata::load(temp.path(), "demo", &config).unwrap_err();
        assert!(matches!(err, AppStoreError::YamlMetadata { .. }));
        assert!(err.to_string().contains(METADATA_YAML));
    }
}
