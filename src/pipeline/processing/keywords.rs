use super::normalize::push_unique;
use once_cell::sync::Lazy;
use regex::Regex;

/// Keyword label and the effect-text pattern that implies it
static KEYWORD_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("Action", r"(?i)\baction\b"),
        ("Reaction", r"(?i)\breaction\b"),
        ("Showdown", r"(?i)\bshowdown"),
        ("Conquer", r"(?i)\bconquer"),
        ("Gear", r"(?i)\bgear\b"),
        ("Rune", r"(?i)\brunes?\b"),
        ("Heal", r"(?i)\bheal"),
        ("Buff", r"(?i)\bbuff"),
        ("Draw", r"(?i)\bdraw"),
        ("Kill", r"(?i)\bkill"),
    ]
    .into_iter()
    .map(|(label, pattern)| (label, Regex::new(pattern).unwrap()))
    .collect()
});

/// Explicit colors and tags first, then keywords detected in the effect.
pub fn derive_keywords(colors: &[String], tags: &[String], effect: &str) -> Vec<String> {
    let mut keywords = Vec::new();
    for value in colors.iter().chain(tags) {
        if !value.is_empty() {
            push_unique(&mut keywords, value);
        }
    }
    for (label, pattern) in KEYWORD_PATTERNS.iter() {
        if pattern.is_match(effect) {
            push_unique(&mut keywords, label);
        }
    }
    keywords
}
