use anyhow::{Context, Result};
use colored::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use golomey_graph::{pipeline, Configuration};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let root = std::env::current_dir().context("Failed to resolve the project directory")?;
    let config = Configuration::default().rooted_at(&root);

    info!("Reading {} and {}", config.tei_path.display(), config.csv_path.display());

    let report = match pipeline::run(&config) {
        Ok(report) => report,
        Err(e) => {
            error!("Graph build failed: {:#}", e);
            return Err(e);
        }
    };

    info!("{}", report.stats);
    println!(
        "{} {} with {} triples.",
        "Wrote".bright_green().bold(),
        report.output_path.display().to_string().bright_green(),
        report.triples.to_string().bright_cyan()
    );

    Ok(())
}
