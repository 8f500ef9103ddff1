use super::normalize::push_unique;
use crate::types::CardCost;
use once_cell::sync::Lazy;
use regex::Regex;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static POWER_SYMBOL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([A-Z])\]").unwrap());

/// Parse a normalized cost string such as `"2[R][R]"`.
///
/// All digit groups are concatenated before parsing, so `"1[R]2"` has energy
/// 12. Power symbols keep first-seen order without repeats.
pub fn parse_cost(raw: &str) -> CardCost {
    let digits: String = DIGITS.find_iter(raw).map(|m| m.as_str()).collect();
    let energy = if digits.is_empty() { None } else { digits.parse::<u64>().ok() };

    let mut power_symbols = Vec::new();
    for caps in POWER_SYMBOL.captures_iter(raw) {
        push_unique(&mut power_symbols, &caps[1]);
    }

    CardCost {
        energy,
        power_symbols,
        raw: if raw.is_empty() { None } else { Some(raw.to_string()) },
    }
}
