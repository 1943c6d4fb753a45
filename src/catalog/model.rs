//! Catalog document types (appstore.json)
//!
//! Field order matters: the serialized key order is part of the output
//! format consumers diff against, so fields are declared in emission order.

use serde::{Deserialize, Serialize};

/// Architectures an app supports unless its metadata says otherwise
pub const DEFAULT_ARCHITECTURES: &[&str] = &["amd64", "arm64"];

/// App classification used when metadata does not set `type`
pub const DEFAULT_APP_TYPE: &str = "runtime";

pub const DEFAULT_INSTALL_LIMIT: i64 = 1;
pub const DEFAULT_RECOMMEND: i64 = 100;

/// The root catalog document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub valid: bool,
    pub violations: Vec<String>,
    pub id: String,
    pub icon: String,
    pub last_modified: i64,
    pub name: String,
    pub title: String,
    pub extra: CatalogExtra,
    pub apps: Vec<AppEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogExtra {
    pub version: String,
}

/// One application directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEntry {
    pub valid: bool,
    pub violations: Vec<String>,
    pub id: String,
    pub last_modified: i64,
    pub icon: String,
    pub read_me: String,
    pub description: String,
    pub name: String,
    pub tags: Vec<String>,
    pub title: String,
    pub additional_properties: AdditionalProperties,
    pub versions: Vec<VersionEntry>,
}

/// Install-time properties of an app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalProperties {
    pub key: String,
    pub name: String,
    pub tags: Vec<String>,
    pub short_desc_zh: String,
    pub short_desc_en: String,
    pub description: LocalizedDescription,
    #[serde(rename = "type")]
    pub app_type: String,
    pub cross_version_update: bool,
    pub limit: i64,
    pub recommend: i64,
    pub website: String,
    pub github: String,
    pub document: String,
    pub architectures: Vec<String>,
}

/// English and Chinese long descriptions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedDescription {
    #[serde(default, deserialize_with = "super::scalar::string_or_empty")]
    pub en: String,
    #[serde(default, deserialize_with = "super::scalar::string_or_empty")]
    pub zh: String,
}

/// One released version of an app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    pub valid: bool,
    pub violations: Vec<String>,
    pub id: String,
    pub read_me: Option<String>,
    pub name: String,
    pub last_modified: i64,
    pub files: Vec<FileEntry>,
    pub download_url: String,
    pub download_callback_url: String,
}

/// One release file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub last_modified: String,
}

impl Catalog {
    /// Serialize as pretty-printed JSON (two-space indent, UTF-8 kept as-is)
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
