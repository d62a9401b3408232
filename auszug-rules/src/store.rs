//! Persistent split rules: `split_rules.json`.
//!
//! The document is a flat JSON object mapping a trigger text to the display
//! name it resolves to:
//!
//! ```json
//! {
//!   "PayPal Europe S.a.r.l. et Cie S.C.A": "PayPal",
//!   "REWE Markt GmbH": "REWE"
//! }
//! ```
//!
//! Key order matters: the first trigger found in a booking text wins, so the
//! document is read and written in insertion order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::split::{Split, apply_split_rule};

pub const DEFAULT_RULES_FILE: &str = "split_rules.json";

#[derive(Error, Debug)]
pub enum RuleStoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a rule document: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("rule {key:?} in {} must map to a string", path.display())]
    NotAString { path: PathBuf, key: String },
    #[error("failed to encode rules: {0}")]
    Encode(#[source] serde_json::Error),
}

/// One learned rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub trigger: String,
    pub name: String,
}

/// All rules of a document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, trigger: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.trigger == trigger)
            .map(|r| r.name.as_str())
    }

    /// Insert or replace. A replaced rule keeps its position.
    pub fn upsert(&mut self, trigger: impl Into<String>, name: impl Into<String>) {
        let trigger = trigger.into();
        let name = name.into();
        match self.rules.iter_mut().find(|r| r.trigger == trigger) {
            Some(rule) => rule.name = name,
            None => self.rules.push(Rule { trigger, name }),
        }
    }

    /// Split `text` by the first rule whose trigger occurs in it.
    pub fn find_split(&self, text: &str) -> Option<Split> {
        apply_split_rule(text, self)
    }

    /// Unique display names, sorted.
    pub fn declarations(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.iter().map(|r| r.name.clone()).collect();
        names.sort();
        names.dedup();
        names
    }

    fn from_document(path: &Path, doc: Map<String, Value>) -> Result<Self, RuleStoreError> {
        let mut set = RuleSet::new();
        for (trigger, value) in doc {
            let Value::String(name) = value else {
                return Err(RuleStoreError::NotAString {
                    path: path.to_path_buf(),
                    key: trigger,
                });
            };
            set.upsert(trigger, name);
        }
        Ok(set)
    }

    fn to_document(&self) -> Map<String, Value> {
        self.rules
            .iter()
            .map(|r| (r.trigger.clone(), Value::String(r.name.clone())))
            .collect()
    }
}

impl<T: Into<String>, N: Into<String>> FromIterator<(T, N)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (T, N)>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for (trigger, name) in iter {
            set.upsert(trigger, name);
        }
        set
    }
}

/// File-backed rule document.
///
/// Nothing is cached: every [`load`](RuleStore::load) reads the file, every
/// [`save`](RuleStore::save) rewrites it, so a rule learned for one booking
/// applies to the next one.
#[derive(Debug, Clone)]
pub struct RuleStore {
    path: PathBuf,
}

impl RuleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document. A missing file is an empty rule set.
    pub fn load(&self) -> Result<RuleSet, RuleStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(RuleSet::new()),
            Err(source) => {
                return Err(RuleStoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if raw.trim().is_empty() {
            return Ok(RuleSet::new());
        }

        let doc: Map<String, Value> =
            serde_json::from_str(&raw).map_err(|source| RuleStoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        RuleSet::from_document(&self.path, doc)
    }

    /// Upsert one rule and rewrite the document.
    pub fn save(&self, trigger: &str, name: &str) -> Result<(), RuleStoreError> {
        let mut rules = self.load()?;
        rules.upsert(trigger, name);
        self.write(&rules)?;
        tracing::debug!(trigger, name, path = %self.path.display(), "saved split rule");
        Ok(())
    }

    /// Replace the document with `rules`.
    pub fn write(&self, rules: &RuleSet) -> Result<(), RuleStoreError> {
        let mut json =
            serde_json::to_string_pretty(&rules.to_document()).map_err(RuleStoreError::Encode)?;
        json.push('\n');
        fs::write(&self.path, json).map_err(|source| RuleStoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Sorted unique display names currently on disk.
    pub fn declarations(&self) -> Result<Vec<String>, RuleStoreError> {
        Ok(self.load()?.declarations())
    }
}
