use crate::types::RuleClause;
use once_cell::sync::Lazy;
use regex::Regex;

/// Sentence end followed by whitespace, or a newline
static CLAUSE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+|\n").unwrap());

static CLAUSE_MARKERS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("action", r"^ACTION\b"),
        ("reaction", r"^REACTION\b"),
        ("trigger", r"\bWhen(ever)?\b"),
        ("buff", r"(?i)\bbuff"),
        ("removal", r"(?i)\bkill"),
        ("healing", r"(?i)\bheal"),
    ]
    .into_iter()
    .map(|(tag, pattern)| (tag, Regex::new(pattern).unwrap()))
    .collect()
});

/// Split effect text into sentence-like fragments, trimmed, empties dropped.
pub fn split_clauses(effect: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut start = 0;
    for m in CLAUSE_BREAK.find_iter(effect) {
        // keep the terminating punctuation with its sentence
        let end = if m.as_str().starts_with('\n') { m.start() } else { m.start() + 1 };
        fragments.push(&effect[start..end]);
        start = m.end();
    }
    fragments.push(&effect[start..]);

    fragments.into_iter().map(str::trim).filter(|f| !f.is_empty()).collect()
}

pub fn clause_tags(text: &str) -> Vec<String> {
    CLAUSE_MARKERS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(tag, _)| tag.to_string())
        .collect()
}

/// Segment the effect into clauses with ids `<card_id>-clause-<n>`.
pub fn segment_rules(card_id: &str, effect: &str) -> Vec<RuleClause> {
    split_clauses(effect)
        .into_iter()
        .enumerate()
        .map(|(i, text)| RuleClause {
            id: format!("{}-clause-{}", card_id, i + 1),
            text: text.to_string(),
            tags: clause_tags(text),
        })
        .collect()
}
