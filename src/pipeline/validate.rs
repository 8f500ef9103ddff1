use crate::types::EnrichedDataset;
use std::collections::HashSet;

/// Consistency problems in an enriched dataset. Empty means valid.
pub fn validate_dataset(dataset: &EnrichedDataset) -> Vec<String> {
    let mut findings = Vec::new();

    if dataset.total_cards != dataset.cards.len() {
        findings.push(format!(
            "totalCards is {} but the dataset holds {} cards",
            dataset.total_cards,
            dataset.cards.len()
        ));
    }

    let mut slugs = HashSet::new();
    for card in &dataset.cards {
        if !slugs.insert(card.slug.as_str()) {
            findings.push(format!("duplicate slug '{}'", card.slug));
        }
        for (i, clause) in card.rules.iter().enumerate() {
            let expected = format!("{}-clause-{}", card.id, i + 1);
            if clause.id != expected {
                findings.push(format!("card {}: clause id '{}' should be '{}'", card.id, clause.id, expected));
            }
        }
    }

    findings
}
