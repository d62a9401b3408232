//! auszug-rules: learned split rules, fuzzy declaration lookup and the
//! booking enricher that ties them to an operator.

pub mod enrich;
pub mod prompt;
pub mod similarity;
pub mod split;
pub mod store;

pub use enrich::{EnrichError, EnrichOptions, EnrichStats, Enricher, Resolution};
pub use prompt::{Prompter, ScriptedPrompter};
pub use similarity::{ratio, shortlist};
pub use split::{Split, apply_split_rule, clean_description};
pub use store::{DEFAULT_RULES_FILE, Rule, RuleSet, RuleStore, RuleStoreError};
