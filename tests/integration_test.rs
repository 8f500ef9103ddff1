use anyhow::Result;
use card_catalog::pipeline::transformer::{read_dataset, read_manifest};
use card_catalog::pipeline::Transformer;
use card_catalog::types::{ImageManifestEntry, RawCardDump, Timing};
use serde_json::json;
use std::fs;
use tempfile::tempdir;

fn scenario_dump() -> serde_json::Value {
    json!({
        "names": ["id", "slug", "name", "effect", "cost"],
        "data": [
            ["c1", "c1", "Test Card", "ACTION: Kill target unit. Heal 2.", "3[F]"]
        ]
    })
}

#[test]
fn test_end_to_end_scenario() -> Result<()> {
    let temp_dir = tempdir()?;
    let raw = temp_dir.path().join("cards.raw.json");
    let dataset_path = temp_dir.path().join("out/cards.enriched.json");
    let manifest_path = temp_dir.path().join("out/card-images.json");
    fs::write(&raw, serde_json::to_string(&scenario_dump())?)?;

    let summary = Transformer::new().run(&raw, &dataset_path, &manifest_path)?;
    assert_eq!(summary.total_cards, 1);
    assert_eq!(summary.with_image, 0);

    let dataset = read_dataset(&dataset_path)?;
    assert_eq!(dataset.total_cards, 1);
    let card = &dataset.cards[0];

    assert_eq!(card.activation.timing, Timing::Action);
    assert_eq!(card.activation.actions, vec!["kill", "heal"]);
    assert!(card.activation.requires_target);
    assert!(card.activation.stateful);
    assert!(card.activation.triggers.is_empty());

    assert_eq!(card.cost.energy, Some(3));
    assert_eq!(card.cost.power_symbols, vec!["F"]);
    assert_eq!(card.cost.raw.as_deref(), Some("3[F]"));

    assert_eq!(card.rules.len(), 2);
    assert_eq!(card.rules[0].text, "ACTION: Kill target unit.");
    assert_eq!(card.rules[0].tags, vec!["action", "removal"]);
    assert_eq!(card.rules[1].text, "Heal 2.");
    assert_eq!(card.rules[1].tags, vec!["healing"]);

    for keyword in ["Action", "Kill", "Heal"] {
        assert!(card.keywords.iter().any(|k| k == keyword), "missing keyword {keyword}");
    }

    let manifest = read_manifest(&manifest_path)?;
    assert_eq!(
        manifest,
        vec![ImageManifestEntry {
            id: "c1".to_string(),
            name: Some("Test Card".to_string()),
            remote: None,
            local_path: "assets/cards/c1.webp".to_string(),
        }]
    );
    Ok(())
}

#[test]
fn test_output_uses_camel_case_and_nulls() -> Result<()> {
    let temp_dir = tempdir()?;
    let raw = temp_dir.path().join("raw.json");
    let dataset_path = temp_dir.path().join("enriched.json");
    let manifest_path = temp_dir.path().join("images.json");
    fs::write(&raw, serde_json::to_string(&scenario_dump())?)?;

    Transformer::new().run(&raw, &dataset_path, &manifest_path)?;
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&dataset_path)?)?;

    assert!(value["generatedAt"].is_string());
    assert_eq!(value["totalCards"], json!(1));
    let card = &value["cards"][0];
    assert_eq!(card["activation"]["timing"], json!("action"));
    assert_eq!(card["activation"]["requiresTarget"], json!(true));
    assert_eq!(card["cost"]["powerSymbols"], json!(["F"]));
    assert!(card["setName"].is_null());
    assert!(card["might"].is_null());
    assert_eq!(card["pricing"]["currency"], json!("USD"));
    assert!(card["references"]["marketUrl"].is_null());
    assert_eq!(card["assets"]["localPath"], json!("assets/cards/c1.webp"));
    Ok(())
}

#[test]
fn test_transform_is_idempotent() -> Result<()> {
    let dump: RawCardDump = serde_json::from_value(json!({
        "names": ["id", "name", "color", "tags", "effect", "cost", "might", "price"],
        "data": [
            ["C001", "Ahri", "Calm", "Vastaya", "When you play me, draw 1. Buff a unit. Recall me.", "3[C]", 4, "1.10"],
            ["C002", "Jinx", ["Fury", "Chaos"], null, "REACTION: Kill a unit during a showdown.", "2[R][R]", null, null],
            ["C003", null, null, null, null, null, null, null]
        ]
    }))?;

    let transformer = Transformer::new();
    let first = transformer.build_dataset(&dump);
    let second = transformer.build_dataset(&dump);
    assert_eq!(serde_json::to_string(&first.cards)?, serde_json::to_string(&second.cards)?);

    let ids: Vec<&str> = first.cards[0].rules.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["C001-clause-1", "C001-clause-2", "C001-clause-3"]);

    assert_eq!(first.cards[1].activation.timing, Timing::Reaction);
    assert_eq!(first.cards[1].activation.reaction_windows, vec!["showdown"]);
    assert_eq!(first.cards[1].cost.power_symbols, vec!["R"]);
    assert_eq!(first.cards[2].activation.timing, Timing::Passive);
    assert!(first.cards[2].rules.is_empty());
    Ok(())
}

#[test]
fn test_timing_priority_action_over_trigger() -> Result<()> {
    let dump: RawCardDump = serde_json::from_value(json!({
        "names": ["id", "effect"],
        "data": [["t1", "ACTION: Whenever an ally dies this turn, draw 1."]]
    }))?;
    let dataset = Transformer::new().build_dataset(&dump);
    let activation = &dataset.cards[0].activation;
    assert_eq!(activation.timing, Timing::Action);
    assert_eq!(activation.triggers, vec!["Whenever an ally dies this turn, draw 1"]);
    Ok(())
}

#[test]
fn test_rerun_overwrites_artifacts() -> Result<()> {
    let temp_dir = tempdir()?;
    let raw = temp_dir.path().join("raw.json");
    let dataset_path = temp_dir.path().join("enriched.json");
    let manifest_path = temp_dir.path().join("images.json");

    fs::write(&raw, serde_json::to_string(&scenario_dump())?)?;
    Transformer::new().run(&raw, &dataset_path, &manifest_path)?;

    fs::write(&raw, r#"{"names": ["id"], "data": [["x1"], ["x2"]]}"#)?;
    Transformer::new().run(&raw, &dataset_path, &manifest_path)?;

    let dataset = read_dataset(&dataset_path)?;
    let ids: Vec<&str> = dataset.cards.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["x1", "x2"]);
    assert_eq!(read_manifest(&manifest_path)?.len(), 2);
    Ok(())
}
