//! App store catalog generation
//!
//! Turns an `apps/` tree into the `appstore.json` document.
//!
//! ```text
//! apps/
//!     ├── <app>/metadata.yml | metadata.json   ← optional overrides
//!     ├── <app>/README.md, logo.png, ...       ← optional assets
//!     └── <app>/<version>/*                    ← release files
//!            │
//!            ▼
//!     CatalogGenerator
//!            │
//!            ▼
//!     appstore.json
//! ```

mod files;
mod generator;
mod metadata;
mod model;
mod scalar;
mod version;

pub use files::{format_file_timestamp, list_release_files, FILE_TIMESTAMP_FORMAT};
pub use generator::{CatalogGenerator, GenerationReport, SkippedApp, DEFAULT_ICON_FILE};
pub use metadata::{
    title_case, AppMetadata, ICON_CANDIDATES, METADATA_JSON, METADATA_YAML, README_FILE,
};
pub use model::{
    AdditionalProperties, AppEntry, Catalog, CatalogExtra, FileEntry, LocalizedDescription,
    VersionEntry, DEFAULT_APP_TYPE, DEFAULT_ARCHITECTURES, DEFAULT_INSTALL_LIMIT,
    DEFAULT_RECOMMEND,
};
pub use version::{is_version_dir, normalize_version, CHANNEL_NAMES};
