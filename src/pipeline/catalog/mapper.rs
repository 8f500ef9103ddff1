use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::types::{EnrichedCardRecord, RuleClause, Timing};

/// Flattened, store-facing projection of an enriched card, keyed by `slug`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub slug: String,
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    pub rarity: Option<String>,
    pub set_name: Option<String>,
    pub colors: Vec<String>,
    pub energy: Option<u64>,
    pub power_symbols: Vec<String>,
    pub cost_raw: Option<String>,
    pub might: Option<f64>,
    pub tags: Vec<String>,
    pub effect: String,
    pub flavor: Option<String>,
    pub keywords: Vec<String>,
    pub timing: Timing,
    pub triggers: Vec<String>,
    pub actions: Vec<String>,
    pub requires_target: bool,
    pub reaction_windows: Vec<String>,
    pub stateful: bool,
    pub rules: Vec<RuleClause>,
    pub image_remote: Option<String>,
    pub image_local_path: String,
    pub price: Option<f64>,
    pub foil_price: Option<f64>,
    pub currency: String,
    pub market_url: Option<String>,
    pub source: String,
    /// SHA-256 of the record's JSON, for change detection downstream
    pub content_hash: String,
    pub last_indexed_at: DateTime<Utc>,
}

/// Maps enriched records to catalog items
pub struct CatalogMapper;

impl CatalogMapper {
    pub fn map_to_item(record: &EnrichedCardRecord, indexed_at: DateTime<Utc>) -> Result<CatalogItem> {
        Ok(CatalogItem {
            slug: record.slug.clone(),
            id: record.id.clone(),
            name: record.name.clone(),
            card_type: record.card_type.clone(),
            rarity: record.rarity.clone(),
            set_name: record.set_name.clone(),
            colors: record.colors.clone(),
            energy: record.cost.energy,
            power_symbols: record.cost.power_symbols.clone(),
            cost_raw: record.cost.raw.clone(),
            might: record.might,
            tags: record.tags.clone(),
            effect: record.effect.clone(),
            flavor: record.flavor.clone(),
            keywords: record.keywords.clone(),
            timing: record.activation.timing,
            triggers: record.activation.triggers.clone(),
            actions: record.activation.actions.clone(),
            requires_target: record.activation.requires_target,
            reaction_windows: record.activation.reaction_windows.clone(),
            stateful: record.activation.stateful,
            rules: record.rules.clone(),
            image_remote: record.assets.remote.clone(),
            image_local_path: record.assets.local_path.clone(),
            price: record.pricing.price,
            foil_price: record.pricing.foil_price,
            currency: record.pricing.currency.clone(),
            market_url: record.references.market_url.clone(),
            source: record.references.source.clone(),
            content_hash: content_hash(record)?,
            last_indexed_at: indexed_at,
        })
    }

    /// Map every record with one shared timestamp, preserving order.
    pub fn map_all(records: &[EnrichedCardRecord]) -> Result<Vec<CatalogItem>> {
        let indexed_at = Utc::now();
        records.iter().map(|r| Self::map_to_item(r, indexed_at)).collect()
    }
}

pub fn content_hash(record: &EnrichedCardRecord) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(record)?);
    Ok(hex::encode(hasher.finalize()))
}
