use std::collections::HashMap;

use crate::constants;
use crate::types::{
    CardAssets, CardPricing, CardReferences, EnrichedCardRecord, RawCardDump, RawValue,
};

use super::activation::build_activation;
use super::clauses::segment_rules;
use super::cost::parse_cost;
use super::keywords::derive_keywords;
use super::normalize::{listify, normalize, normalize_opt, to_number};

static NULL: RawValue = RawValue::Null;

/// One dump row keyed by field name
#[derive(Debug)]
pub struct RawRow<'a> {
    fields: HashMap<&'a str, &'a RawValue>,
}

impl<'a> RawRow<'a> {
    /// First alias present in the row wins; absent fields read as null.
    pub fn get(&self, aliases: &[&str]) -> &'a RawValue {
        aliases
            .iter()
            .find_map(|name| self.fields.get(name).copied())
            .unwrap_or(&NULL)
    }
}

/// Zip a row against the field names. Missing trailing values read as null
/// and values past the last name are ignored.
pub fn reshape<'a>(names: &'a [String], row: &'a [RawValue]) -> RawRow<'a> {
    let mut fields = HashMap::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        fields.entry(name.as_str()).or_insert(row.get(i).unwrap_or(&NULL));
    }
    RawRow { fields }
}

/// Builds enriched records from raw rows
pub struct CardEnricher {
    /// Relative directory for image assets
    pub asset_dir: String,
    pub asset_ext: String,
}

impl Default for CardEnricher {
    fn default() -> Self {
        Self {
            asset_dir: constants::IMAGE_ASSET_DIR.to_string(),
            asset_ext: constants::IMAGE_ASSET_EXT.to_string(),
        }
    }
}

impl CardEnricher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enrich every row of the dump, in row order.
    pub fn enrich_dump(&self, dump: &RawCardDump) -> Vec<EnrichedCardRecord> {
        dump.data
            .iter()
            .enumerate()
            .map(|(i, row)| self.enrich_row(&reshape(&dump.names, row), i))
            .collect()
    }

    /// `position` is the zero-based row index, used only for the id fallback.
    pub fn enrich_row(&self, row: &RawRow<'_>, position: usize) -> EnrichedCardRecord {
        let id = match normalize(row.get(&["id"])) {
            id if id.is_empty() => format!("row-{}", position + 1),
            id => id,
        };
        let slug = normalize_opt(row.get(&["slug"])).unwrap_or_else(|| id.clone());

        let colors = listify(row.get(&["colors", "color"]));
        let tags = listify(row.get(&["tags"]));
        let effect = normalize(row.get(&["effect", "text"]));

        let keywords = derive_keywords(&colors, &tags, &effect);
        let activation = build_activation(&effect);
        let rules = segment_rules(&id, &effect);
        let local_path = self.asset_path(&slug);

        EnrichedCardRecord {
            name: normalize_opt(row.get(&["name"])),
            card_type: normalize_opt(row.get(&["type", "card_type"])),
            rarity: normalize_opt(row.get(&["rarity"])),
            set_name: normalize_opt(row.get(&["set_name", "set", "setName"])),
            cost: parse_cost(&normalize(row.get(&["cost"]))),
            might: to_number(row.get(&["might"])),
            flavor: normalize_opt(row.get(&["flavor", "flavor_text"])),
            assets: CardAssets {
                remote: normalize_opt(row.get(&["image", "image_url"])),
                local_path,
            },
            pricing: CardPricing {
                price: to_number(row.get(&["price"])),
                foil_price: to_number(row.get(&["foil_price", "foilPrice"])),
                currency: constants::PRICE_CURRENCY.to_string(),
            },
            references: CardReferences {
                market_url: normalize_opt(row.get(&["url", "market_url"])),
                source: constants::PROVENANCE_SOURCE.to_string(),
            },
            id,
            slug,
            colors,
            tags,
            effect,
            keywords,
            activation,
            rules,
        }
    }

    /// Deterministic relative image path for a card key.
    pub fn asset_path(&self, key: &str) -> String {
        let file_stem: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
            .collect();
        format!("{}/{}.{}", self.asset_dir, file_stem, self.asset_ext)
    }
}
