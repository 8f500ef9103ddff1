use anyhow::{Context, Result};
use card_catalog::constants;
use card_catalog::pipeline::transformer::read_dataset;
use card_catalog::pipeline::validate::validate_dataset;
use clap::Parser;
use std::path::PathBuf;

/// Check an enriched dataset for count, slug and clause-id consistency.
#[derive(Parser, Debug)]
#[command(name = "validate-dataset", version, about = "Validate an enriched card dataset")]
struct Cli {
    /// Path to the enriched dataset (defaults to data/cards.enriched.json)
    path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let path = args
        .path
        .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_DATASET_PATH));

    let dataset = read_dataset(&path).with_context(|| format!("Failed to load {}", path.display()))?;
    let findings = validate_dataset(&dataset);
    if findings.is_empty() {
        println!("valid ({} cards)", dataset.cards.len());
        return Ok(());
    }

    eprintln!("invalid:");
    for finding in &findings {
        eprintln!("- {}", finding);
    }
    std::process::exit(1)
}
