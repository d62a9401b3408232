//! Splitting a booking text into counterparty name and remark.

use crate::store::RuleSet;

/// Separators that may trail a counterparty name.
const LEADING_NOISE: &[char] = &[' ', ',', '.', ';', ':', '-', '/', '_', ')'];

/// Result of a split: who, and what is left of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub name: String,
    pub description: String,
}

/// Strip leading separators from the remark.
pub fn clean_description(text: &str) -> &str {
    text.trim_start_matches(LEADING_NOISE)
}

/// First rule whose trigger occurs in `text`, in rule order.
pub fn apply_split_rule(text: &str, rules: &RuleSet) -> Option<Split> {
    rules.iter().find_map(|rule| {
        let at = text.find(rule.trigger.as_str())?;
        let rest = text[at + rule.trigger.len()..].trim();
        Some(Split {
            name: rule.name.clone(),
            description: clean_description(rest).to_string(),
        })
    })
}
