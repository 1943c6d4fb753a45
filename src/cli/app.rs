use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{
    resolve_repository, GeneratorConfig, DEFAULT_APPS_DIR, DEFAULT_BRANCH, DEFAULT_OUTPUT_FILE,
};

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Generate appstore.json from an apps/ directory
#[derive(Parser, Debug)]
#[command(name = "generate-appstore")]
#[command(version)]
#[command(
    long_about = "Walks the apps directory (one folder per app, one subfolder per version) and writes a JSON catalog with download URLs on the GitHub raw-content mirror."
)]
pub struct Cli {
    /// Directory containing one subdirectory per app
    #[arg(long, default_value = DEFAULT_APPS_DIR)]
    pub apps_dir: PathBuf,

    /// Output file for the catalog
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Repository as owner/repo (defaults to $GITHUB_REPOSITORY)
    #[arg(long)]
    pub repo: Option<String>,

    /// Branch served by the raw-content mirror
    #[arg(long, default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Print the catalog to stdout instead of writing the output file
    #[arg(long)]
    pub dry_run: bool,

    /// Set log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Cli {
    /// Resolve the generator config, falling back to the given environment
    /// value for the repository when `--repo` is not set
    pub fn to_config(&self, env_repository: Option<String>) -> GeneratorConfig {
        GeneratorConfig::new(resolve_repository(self.repo.clone(), env_repository))
            .with_branch(self.branch.clone())
            .with_apps_dir(self.apps_dir.clone())
            .with_output_file(self.output.clone())
    }
}
