use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use appstore_generator::{
    catalog::CatalogGenerator,
    cli::{Cli, LogLevel},
    config::REPOSITORY_ENV,
};

fn initialize_tracing(log_level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_filter_directive()))
        .with_target(false)
        .with_writer(std::io::stderr) // stdout carries the catalog in --dry-run
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    let config = cli.to_config(std::env::var(REPOSITORY_ENV).ok());
    tracing::debug!(?config, "Resolved configuration");

    let generator = CatalogGenerator::new(config);

    if cli.dry_run {
        let report = generator.build().context("Failed to build catalog")?;
        let json = report
            .catalog
            .to_json_pretty()
            .context("Failed to serialize catalog")?;
        println!("{json}");
        return Ok(());
    }

    generator.generate().with_context(|| {
        format!(
            "Failed to generate {}",
            generator.config().output_file.display()
        )
    })?;

    Ok(())
}
