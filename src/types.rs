use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw value as it appears in a dump cell
pub type RawValue = serde_json::Value;

/// Columnar card dump: field names plus positionally aligned rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCardDump {
    pub names: Vec<String>,
    pub data: Vec<Vec<RawValue>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardCost {
    pub energy: Option<u64>,
    pub power_symbols: Vec<String>,
    pub raw: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timing {
    Action,
    Reaction,
    Triggered,
    Passive,
}

/// When and how a card's effect fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    pub timing: Timing,
    pub triggers: Vec<String>,
    pub actions: Vec<String>,
    pub requires_target: bool,
    pub reaction_windows: Vec<String>,
    pub stateful: bool,
}

/// One sentence-level fragment of effect text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleClause {
    pub id: String,
    pub text: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAssets {
    pub remote: Option<String>,
    pub local_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPricing {
    pub price: Option<f64>,
    pub foil_price: Option<f64>,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardReferences {
    pub market_url: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedCardRecord {
    pub id: String,
    pub slug: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    pub rarity: Option<String>,
    pub set_name: Option<String>,
    pub colors: Vec<String>,
    pub cost: CardCost,
    pub might: Option<f64>,
    pub tags: Vec<String>,
    pub effect: String,
    pub flavor: Option<String>,
    pub keywords: Vec<String>,
    pub activation: Activation,
    pub rules: Vec<RuleClause>,
    pub assets: CardAssets,
    pub pricing: CardPricing,
    pub references: CardReferences,
}

/// The enriched dataset artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedDataset {
    pub generated_at: DateTime<Utc>,
    pub total_cards: usize,
    pub cards: Vec<EnrichedCardRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageManifestEntry {
    pub id: String,
    pub name: Option<String>,
    pub remote: Option<String>,
    pub local_path: String,
}

impl From<&EnrichedCardRecord> for ImageManifestEntry {
    fn from(card: &EnrichedCardRecord) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            remote: card.assets.remote.clone(),
            local_path: card.assets.local_path.clone(),
        }
    }
}
