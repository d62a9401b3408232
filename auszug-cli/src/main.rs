use anyhow::{Context, Result, bail};
use auszug_ingest::{Pdftotext, list_pdfs, load_statement};
use auszug_rules::{EnrichOptions, Enricher, RuleStore};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod console;
mod export;

use console::ConsolePrompter;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("AUSZUG_REVISION"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "auszug",
    version = VERSION,
    about = "Convert DKB account statement PDFs to CSV",
    after_help = "Examples:\n  auszug input.pdf output.csv\n  auszug pdf_ordner/ output.csv"
)]
struct Cli {
    /// Statement PDF, or a directory whose *.pdf files are read in name order
    input: PathBuf,

    /// CSV file to write
    output: PathBuf,

    /// Split rule document (default: split_rules.json, or rules_path from the config)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Config file (default: ./auszug.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not ask about unknown counterparties; keep their text unsplit
    #[arg(long)]
    no_prompt: bool,

    /// More log output on stderr (-v info, -vv debug); RUST_LOG wins if set
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not errors
            let code = if e.use_stderr() { 1 } else { 0 };
            e.print().ok();
            std::process::exit(code);
        }
    };

    init_tracing(cli.verbose);
    run(cli)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cfg = config::load_config(cli.config.as_deref())?;

    let pdfs = input_files(&cli.input)?;
    let extractor =
        Pdftotext::new(cfg.extractor.command.as_str()).with_layout(cfg.extractor.layout);

    let mut bookings = Vec::new();
    for pdf in &pdfs {
        println!("→ Verarbeite {}", file_label(pdf));
        bookings.extend(load_statement(&extractor, pdf));
    }

    let store = RuleStore::new(cli.rules.unwrap_or(cfg.rules_path));
    let options = EnrichOptions {
        interactive: cfg.interactive && !cli.no_prompt,
        fuzzy_threshold: cfg.shortlist.threshold,
        shortlist_limit: cfg.shortlist.limit,
    };

    let mut prompter = ConsolePrompter::stdio();
    let stats = Enricher::new(&store, options)
        .enrich_all(&mut bookings, &mut prompter)
        .with_context(|| format!("enriching bookings (rules: {})", store.path().display()))?;

    export::write_csv(&cli.output, &bookings)?;

    tracing::info!(
        by_rule = stats.by_rule,
        learned = stats.learned,
        unresolved = stats.unresolved,
        "enrichment finished"
    );
    println!("✔ {} Buchungen nach {} exportiert", bookings.len(), cli.output.display());

    Ok(())
}

/// A single PDF, or every PDF in a directory.
fn input_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_dir() {
        let pdfs = list_pdfs(input).with_context(|| format!("read {}", input.display()))?;
        if pdfs.is_empty() {
            tracing::warn!(dir = %input.display(), "no PDF files found");
        }
        Ok(pdfs)
    } else if input.is_file() {
        Ok(vec![input.to_path_buf()])
    } else {
        bail!("Ungültiger Eingabepfad: {}", input.display());
    }
}

fn file_label(p: &Path) -> String {
    p.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| p.display().to_string())
}
