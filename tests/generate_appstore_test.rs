//! Integration tests for appstore.json generation through the public API

use anyhow::Result;
use appstore_generator::catalog::CatalogGenerator;
use appstore_generator::config::{GeneratorConfig, DEFAULT_REPOSITORY, REPOSITORY_ENV};
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, content: &str) -> Result<()> {
    fs::create_dir_all(path.parent().unwrap())?;
    fs::write(path, content)?;
    Ok(())
}

fn pinned_generator(root: &Path) -> CatalogGenerator {
    let config = GeneratorConfig::new("acme/store")
        .with_apps_dir(root.join("apps"))
        .with_output_file(root.join("appstore.json"));
    let at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
    CatalogGenerator::new(config).with_timestamp(at)
}

fn read_output(root: &Path) -> Result<Value> {
    let text = fs::read_to_string(root.join("appstore.json"))?;
    Ok(serde_json::from_str(&text)?)
}

#[test]
fn test_full_app_entry_with_metadata() -> Result<()> {
    let temp = TempDir::new()?;
    let app = temp.path().join("apps").join("nginx");
    write(
        &app.join("metadata.yml"),
        r#"
name: Nginx
title: Nginx Web Server
description: Reverse proxy
descriptionZh: 反向代理
shortDescZh: 代理
tags: [web, proxy]
type: website
crossVersionUpdate: false
limit: 2
recommend: 10
website: https://nginx.org
github: https://github.com/nginx/nginx
document: https://nginx.org/en/docs/
architectures: [amd64]
"#,
    )?;
    write(&app.join("README.md"), "# Nginx\n")?;
    write(&app.join("logo.svg"), "<svg/>")?;
    write(&app.join("1-26-0").join("docker-compose.yml"), "services: {}\n")?;

    pinned_generator(temp.path()).generate()?;
    let output = read_output(temp.path())?;

    let entry = &output["apps"][0];
    assert_eq!(entry["id"], "nginx");
    assert_eq!(entry["valid"], true);
    assert_eq!(entry["violations"], json!([]));
    assert_eq!(entry["lastModified"], 1_700_000_000);
    assert_eq!(
        entry["icon"],
        "https://raw.githubusercontent.com/acme/store/main/apps/nginx/logo.svg"
    );
    assert_eq!(entry["readMe"], "# Nginx\n");
    assert_eq!(entry["name"], "Nginx");
    assert_eq!(entry["title"], "Nginx Web Server");
    assert_eq!(entry["tags"], json!(["web", "proxy"]));
    assert_eq!(
        entry["additionalProperties"],
        json!({
            "key": "nginx",
            "name": "Nginx",
            "tags": ["web", "proxy"],
            "shortDescZh": "代理",
            "shortDescEn": "Reverse proxy",
            "description": {"en": "Reverse proxy", "zh": "反向代理"},
            "type": "website",
            "crossVersionUpdate": false,
            "limit": 2,
            "recommend": 10,
            "website": "https://nginx.org",
            "github": "https://github.com/nginx/nginx",
            "document": "https://nginx.org/en/docs/",
            "architectures": ["amd64"]
        })
    );

    let version = &entry["versions"][0];
    assert_eq!(version["id"], "1-26-0");
    assert_eq!(version["name"], "1.26.0");
    assert_eq!(version["readMe"], Value::Null);
    assert_eq!(version["files"][0]["name"], "docker-compose.yml");
    assert_eq!(version["files"][0]["size"], 13);
    assert_eq!(
        version["downloadUrl"],
        "https://raw.githubusercontent.com/acme/store/main/apps/nginx/1-26-0"
    );
    assert_eq!(
        version["downloadCallbackUrl"],
        "https://api.github.com/repos/acme/store/contents/apps/nginx/1-26-0"
    );

    Ok(())
}

#[test]
fn test_output_key_order_and_formatting() -> Result<()> {
    let temp = TempDir::new()?;
    pinned_generator(temp.path()).generate()?;

    let text = fs::read_to_string(temp.path().join("appstore.json"))?;
    let expected = r#"{
  "valid": true,
  "violations": [],
  "id": "corapanel",
  "icon": "https://cdn-icons-png.flaticon.com/512/4187/4187336.png",
  "lastModified": 1700000000,
  "name": "CoraPANEL",
  "title": "Official Appstore for CoraPANEL",
  "extra": {
    "version": "v1.0.0"
  },
  "apps": []
}"#;
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn test_output_file_is_overwritten() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("appstore.json"), "stale content that is longer")?;
    write(&temp.path().join("apps").join("redis").join("7-0").join("a"), "a")?;

    pinned_generator(temp.path()).generate()?;
    let output = read_output(temp.path())?;
    assert_eq!(output["apps"][0]["id"], "redis");
    Ok(())
}

#[test]
fn test_unwritable_output_is_fatal() -> Result<()> {
    let temp = TempDir::new()?;
    let config = GeneratorConfig::new("acme/store")
        .with_apps_dir(temp.path().join("apps"))
        .with_output_file(temp.path().join("missing-dir").join("appstore.json"));

    let result = CatalogGenerator::new(config).generate();
    assert!(result.is_err());
    Ok(())
}

#[test]
#[serial]
fn test_config_from_env() {
    std::env::set_var(REPOSITORY_ENV, "octo/apps");
    assert_eq!(GeneratorConfig::from_env().repository, "octo/apps");

    std::env::set_var(REPOSITORY_ENV, "");
    assert_eq!(GeneratorConfig::from_env().repository, DEFAULT_REPOSITORY);

    std::env::remove_var(REPOSITORY_ENV);
    assert_eq!(GeneratorConfig::from_env().repository, DEFAULT_REPOSITORY);
}
