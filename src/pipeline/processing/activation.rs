//! Activation profile: when a card's effect fires and what it does.
//!
//! Every derivation here is a best-effort pattern match over the effect text.
//! The tables are iterated in full and in order, so output order is stable.

use crate::types::{Activation, Timing};
use once_cell::sync::Lazy;
use regex::Regex;

static TRIGGER_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(When|Whenever|After|Before|While|During)\b([^.;]*)").unwrap());

static ACTION_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("kill", r"(?i)\bkill(s|ed|ing)?\b"),
        ("buff", r"(?i)\bbuff(s|ed|ing)?\b"),
        ("heal", r"(?i)\bheal(s|ed|ing)?\b"),
        ("draw", r"(?i)\b(draw(s|n|ing)?|drew)\b"),
        ("summon", r"(?i)\bsummon(s|ed|ing)?\b"),
        ("discard", r"(?i)\bdiscard(s|ed|ing)?\b"),
        ("conquer", r"(?i)\bconquer(s|ed|ing)?\b"),
        ("transform", r"(?i)\btransform(s|ed|ing)?\b"),
        ("recover", r"(?i)\brecover(s|ed|ing)?\b"),
    ]
    .into_iter()
    .map(|(label, pattern)| (label, Regex::new(pattern).unwrap()))
    .collect()
});

static REACTION_WINDOWS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("showdown", r"(?i)showdown"),
        ("opponent-turn", r"(?i)opponent['’]?s turn"),
        ("your-turn", r"(?i)your turn"),
    ]
    .into_iter()
    .map(|(label, pattern)| (label, Regex::new(pattern).unwrap()))
    .collect()
});

static TARGET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btargets?\b").unwrap());
static STATEFUL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(buff|heal|transform|summon)\b").unwrap());

static ACTION_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bACTION\b").unwrap());
static REACTION_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bREACTION\b").unwrap());
static WHEN_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bWhen(ever)?\b").unwrap());

/// Trigger phrases in order of appearance, each running to the next `.` or `;`.
pub fn extract_triggers(effect: &str) -> Vec<String> {
    TRIGGER_PHRASE
        .captures_iter(effect)
        .map(|caps| format!("{}{}", &caps[1], &caps[2]).trim().to_string())
        .collect()
}

pub fn derive_actions(effect: &str) -> Vec<String> {
    ACTION_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(effect))
        .map(|(label, _)| label.to_string())
        .collect()
}

pub fn derive_reaction_windows(effect: &str) -> Vec<String> {
    REACTION_WINDOWS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(effect))
        .map(|(label, _)| label.to_string())
        .collect()
}

/// Priority: ACTION, then REACTION, then When/Whenever, else passive.
pub fn classify_timing(effect: &str) -> Timing {
    if ACTION_TOKEN.is_match(effect) {
        Timing::Action
    } else if REACTION_TOKEN.is_match(effect) {
        Timing::Reaction
    } else if WHEN_TOKEN.is_match(effect) {
        Timing::Triggered
    } else {
        Timing::Passive
    }
}

pub fn requires_target(effect: &str) -> bool {
    TARGET.is_match(effect)
}

pub fn is_stateful(effect: &str) -> bool {
    STATEFUL.is_match(effect)
}

pub fn build_activation(effect: &str) -> Activation {
    Activation {
        timing: classify_timing(effect),
        triggers: extract_triggers(effect),
        actions: derive_actions(effect),
        requires_target: requires_target(effect),
        reaction_windows: derive_reaction_windows(effect),
        stateful: is_stateful(effect),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_priority() {
        assert_eq!(classify_timing("ACTION: Whenever you attack, draw 1."), Timing::Action);
        assert_eq!(classify_timing("REACTION: play during ACTION windows"), Timing::Action);
        assert_eq!(classify_timing("REACTION: Whenever a unit dies, heal."), Timing::Reaction);
        assert_eq!(classify_timing("Whenever you conquer, draw 1."), Timing::Triggered);
        assert_eq!(classify_timing("When played, draw 1."), Timing::Triggered);
        assert_eq!(classify_timing("Your units have +1 might."), Timing::Passive);
        // lower-case prose is not a timing marker
        assert_eq!(classify_timing("Take an action when ready."), Timing::Passive);
    }

    #[test]
    fn test_extract_triggers() {
        let triggers = extract_triggers(
            "When you play this, draw 1; After combat, heal 2. During a showdown you may kill a unit.",
        );
        assert_eq!(
            triggers,
            vec![
                "When you play this, draw 1",
                "After combat, heal 2",
                "During a showdown you may kill a unit",
            ]
        );
        assert_eq!(extract_triggers("Whenever."), vec!["Whenever"]);
        assert!(extract_triggers("Kill a unit.").is_empty());
    }

    #[test]
    fn test_actions_follow_table_order() {
        assert_eq!(
            derive_actions("Recover 1. Heals a unit, then killed units are summoned."),
            vec!["kill", "heal", "summon", "recover"]
        );
        assert_eq!(derive_actions("You drew a card and transformed."), vec!["draw", "transform"]);
        assert!(derive_actions("Skillful redrawing").is_empty());
    }

    #[test]
    fn test_reaction_windows() {
        assert_eq!(
            derive_reaction_windows("Play during a Showdown or on your opponents turn."),
            vec!["showdown", "opponent-turn"]
        );
        assert_eq!(
            derive_reaction_windows("Only on your turn or your opponent's turn."),
            vec!["opponent-turn", "your-turn"]
        );
        assert!(derive_reaction_windows("Draw 1.").is_empty());
    }

    #[test]
    fn test_target_and_stateful() {
        assert!(requires_target("Kill target unit."));
        assert!(requires_target("Choose two targets."));
        assert!(!requires_target("Targeting is disabled."));
        assert!(is_stateful("Heal 2."));
        assert!(is_stateful("Summon a Sprite."));
        // whole words only
        assert!(!is_stateful("Heals all units."));
    }
}
