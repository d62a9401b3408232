//! PDF-to-text extraction.
//!
//! The parsers only ever see lines of text. Where they come from is behind
//! [`TextExtractor`]; the production implementation shells out to poppler's
//! `pdftotext`.

use std::path::Path;
use std::process::{Command, Output};

use thiserror::Error;

use crate::text::split_lines;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{command} not found on PATH (install poppler-utils)")]
    NotInstalled { command: String },
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Turns one PDF into its ordered text lines.
pub trait TextExtractor {
    fn extract_lines(&self, pdf: &Path) -> Result<Vec<String>, ExtractError>;
}

/// `pdftotext [-layout] <file> -`
#[derive(Debug, Clone)]
pub struct Pdftotext {
    command: String,
    layout: bool,
}

impl Default for Pdftotext {
    fn default() -> Self {
        Self::new("pdftotext")
    }
}

impl Pdftotext {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            layout: true,
        }
    }

    /// Column layout is what the statement parsers expect; only turn it off
    /// for experiments.
    pub fn with_layout(mut self, layout: bool) -> Self {
        self.layout = layout;
        self
    }

    fn command_line(&self, pdf: &Path) -> Command {
        let mut cmd = Command::new(&self.command);
        if self.layout {
            cmd.arg("-layout");
        }
        cmd.arg(pdf).arg("-");
        cmd
    }
}

impl TextExtractor for Pdftotext {
    fn extract_lines(&self, pdf: &Path) -> Result<Vec<String>, ExtractError> {
        which::which(&self.command).map_err(|_| ExtractError::NotInstalled {
            command: self.command.clone(),
        })?;

        let output = self
            .command_line(pdf)
            .output()
            .map_err(|source| ExtractError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        Ok(output_lines(&self.command, &output))
    }
}

/// Lines of whatever the extractor printed. A non-zero exit is only logged:
/// pdftotext still prints the pages it could read, and those get parsed.
fn output_lines(command: &str, output: &Output) -> Vec<String> {
    if !output.status.success() {
        tracing::warn!(
            command,
            status = %output.status,
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "text extraction exited with an error, parsing partial output"
        );
    }

    let text = String::from_utf8_lossy(&output.stdout);
    split_lines(&text).into_iter().map(str::to_string).collect()
}
