use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use card_catalog::config::Config;
use card_catalog::pipeline::images::{ImageFetcher, ReqwestImageSource};
use card_catalog::pipeline::storage::open_store;
use card_catalog::pipeline::transformer::read_manifest;
use card_catalog::pipeline::{CatalogPublisher, Transformer};
use card_catalog::{logging, metrics};

#[derive(Parser)]
#[command(name = "card_catalog")]
#[command(about = "Card catalog enrichment and publishing pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich the raw card dump into the dataset and image manifest
    Enrich {
        /// Raw dump path (defaults to config / CATALOG_RAW_PATH)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Enriched dataset output path
        #[arg(long)]
        output: Option<PathBuf>,
        /// Image manifest output path
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    /// Publish the enriched dataset into the catalog store
    Publish {
        /// Enriched dataset path
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Catalog table (overrides CATALOG_TABLE)
        #[arg(long)]
        table: Option<String>,
    },
    /// Run enrich then publish
    Run {
        /// Catalog table (overrides CATALOG_TABLE)
        #[arg(long)]
        table: Option<String>,
    },
    /// Download card images listed in the image manifest
    FetchImages {
        /// Image manifest path
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Directory the manifest's local paths are relative to
        #[arg(long)]
        asset_root: Option<PathBuf>,
    },
}

fn enrich(config: &Config) -> anyhow::Result<()> {
    let summary = Transformer::new()
        .run(&config.paths.raw, &config.paths.dataset, &config.paths.manifest)
        .context("enrichment failed")?;
    println!("✅ Enriched {} cards", summary.total_cards);
    println!("   Dataset:  {}", summary.dataset_path.display());
    println!("   Manifest: {} ({} with images)", summary.manifest_path.display(), summary.with_image);
    Ok(())
}

async fn publish(config: &Config) -> anyhow::Result<()> {
    let table = config.require_table()?.to_string();
    let store = open_store(&config.catalog).await?;
    info!("Publishing to table {} via {} store in region {}", table, store.name(), config.catalog.region);

    let publisher = CatalogPublisher::new(store, table);
    let report = publisher
        .publish_dataset(&config.paths.dataset)
        .await
        .context("publish failed")?;
    println!(
        "✅ Uploaded {}/{} cards in {} chunks ({} retries)",
        report.uploaded, report.total_items, report.chunks, report.retries
    );
    Ok(())
}

async fn fetch_images(config: &Config) -> anyhow::Result<()> {
    let manifest = read_manifest(&config.paths.manifest)?;
    let source = ReqwestImageSource::new(Duration::from_secs(config.images.timeout_seconds))?;
    let fetcher = ImageFetcher::new(
        Arc::new(source),
        config.paths.asset_root.clone(),
        Duration::from_millis(config.images.delay_ms),
    );
    let report = fetcher.fetch_all(&manifest).await?;
    println!(
        "✅ Images: {} downloaded, {} skipped, {} without remote, {} failed",
        report.downloaded, report.skipped, report.missing_remote, report.failed
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();
    metrics::init_metrics();

    let cli = Cli::parse();
    let mut config = Config::load()?;

    let result = match cli.command {
        Commands::Enrich { input, output, manifest } => {
            if let Some(p) = input {
                config.paths.raw = p;
            }
            if let Some(p) = output {
                config.paths.dataset = p;
            }
            if let Some(p) = manifest {
                config.paths.manifest = p;
            }
            enrich(&config)
        }
        Commands::Publish { dataset, table } => {
            if let Some(p) = dataset {
                config.paths.dataset = p;
            }
            if table.is_some() {
                config.catalog.table = table;
            }
            publish(&config).await
        }
        Commands::Run { table } => {
            if table.is_some() {
                config.catalog.table = table;
            }
            // check the table before spending time on enrichment
            config.require_table()?;
            println!("\n📥 Step 1: Enriching cards...");
            enrich(&config)?;
            println!("\n📤 Step 2: Publishing catalog...");
            publish(&config).await
        }
        Commands::FetchImages { manifest, asset_root } => {
            if let Some(p) = manifest {
                config.paths.manifest = p;
            }
            if let Some(p) = asset_root {
                config.paths.asset_root = p;
            }
            fetch_images(&config).await
        }
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}
