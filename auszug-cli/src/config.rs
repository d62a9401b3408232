use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use auszug_rules::DEFAULT_RULES_FILE;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "auszug.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub rules_path: PathBuf,
    /// Ask about bookings no rule matches (can be overridden by --no-prompt)
    pub interactive: bool,
    pub extractor: ExtractorSection,
    pub shortlist: ShortlistSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractorSection {
    /// pdftotext binary (name on PATH or absolute path)
    pub command: String,
    pub layout: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShortlistSection {
    pub threshold: f64,
    pub limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules_path: PathBuf::from(DEFAULT_RULES_FILE),
            interactive: true,
            extractor: ExtractorSection::default(),
            shortlist: ShortlistSection::default(),
        }
    }
}

impl Default for ExtractorSection {
    fn default() -> Self {
        Self {
            command: "pdftotext".to_string(),
            layout: true,
        }
    }
}

impl Default for ShortlistSection {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            limit: 5,
        }
    }
}

/// Load `explicit`, or `auszug.toml` if present, or the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                return Ok(Config::default());
            }
            p
        }
    };
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let cfg = parse_config(&s).with_context(|| format!("parse {}", p.display()))?;
    tracing::debug!(path = %p.display(), "loaded config");
    Ok(cfg)
}

pub fn parse_config(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s)?;
    if !(0.0..=1.0).contains(&cfg.shortlist.threshold) {
        bail!(
            "shortlist.threshold must be between 0 and 1, got {}",
            cfg.shortlist.threshold
        );
    }
    if cfg.extractor.command.trim().is_empty() {
        bail!("extractor.command must not be empty");
    }
    Ok(cfg)
}
