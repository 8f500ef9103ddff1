use crate::error::{CatalogError, Result};
use crate::metrics::names;
use crate::pipeline::processing::CardEnricher;
use crate::types::{EnrichedDataset, ImageManifestEntry, RawCardDump};
use chrono::Utc;
use metrics::counter;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Result of a complete transform run
#[derive(Debug, Serialize)]
pub struct TransformSummary {
    pub total_cards: usize,
    pub with_image: usize,
    pub dataset_path: PathBuf,
    pub manifest_path: PathBuf,
}

pub struct Transformer {
    enricher: CardEnricher,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer {
    pub fn new() -> Self {
        Self { enricher: CardEnricher::new() }
    }

    pub fn with_enricher(enricher: CardEnricher) -> Self {
        Self { enricher }
    }

    /// Read the raw dump, enrich every row and overwrite both artifacts.
    #[instrument(skip(self))]
    pub fn run(&self, raw_path: &Path, dataset_path: &Path, manifest_path: &Path) -> Result<TransformSummary> {
        let dump = read_dump(raw_path)?;
        info!("Loaded {} raw rows with {} fields", dump.data.len(), dump.names.len());

        let dataset = self.build_dataset(&dump);
        let manifest: Vec<ImageManifestEntry> = dataset.cards.iter().map(ImageManifestEntry::from).collect();
        counter!(names::CARDS_ENRICHED).increment(dataset.total_cards as u64);

        write_json(dataset_path, &dataset)?;
        write_json(manifest_path, &manifest)?;

        let summary = TransformSummary {
            total_cards: dataset.total_cards,
            with_image: manifest.iter().filter(|m| m.remote.is_some()).count(),
            dataset_path: dataset_path.to_path_buf(),
            manifest_path: manifest_path.to_path_buf(),
        };
        info!(
            "Enriched {} cards ({} with images) -> {}",
            summary.total_cards,
            summary.with_image,
            dataset_path.display()
        );
        Ok(summary)
    }

    /// Pure part of the run: the dataset stamped with the current time.
    pub fn build_dataset(&self, dump: &RawCardDump) -> EnrichedDataset {
        let cards = self.enricher.enrich_dump(dump);
        EnrichedDataset {
            generated_at: Utc::now(),
            total_cards: cards.len(),
            cards,
        }
    }
}

/// Parse the raw dump, checking `names` and `data` are both arrays first so
/// the error says which part is unusable.
pub fn read_dump(path: &Path) -> Result<RawCardDump> {
    if !path.exists() {
        return Err(CatalogError::MissingInput(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| CatalogError::MalformedInput(format!("{}: {}", path.display(), e)))?;

    for key in ["names", "data"] {
        if !value.get(key).is_some_and(|v| v.is_array()) {
            return Err(CatalogError::MalformedInput(format!(
                "{}: missing `{}` array",
                path.display(),
                key
            )));
        }
    }

    serde_json::from_value(value).map_err(|e| CatalogError::MalformedInput(format!("{}: {}", path.display(), e)))
}

pub fn read_dataset(path: &Path) -> Result<EnrichedDataset> {
    if !path.exists() {
        return Err(CatalogError::MissingInput(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn read_manifest(path: &Path) -> Result<Vec<ImageManifestEntry>> {
    if !path.exists() {
        return Err(CatalogError::MissingInput(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json_content = serde_json::to_string_pretty(value)?;
    fs::write(path, json_content)?;
    Ok(())
}
