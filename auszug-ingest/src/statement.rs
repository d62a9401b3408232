//! From PDF files on disk to parsed bookings tagged with their source file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use auszug_core::Booking;

use crate::extract::TextExtractor;
use crate::parsers::dkb::parse_dkb_lines;

/// All `*.pdf` files directly inside `dir`, sorted by file name.
pub fn list_pdfs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            pdfs.push(path);
        }
    }
    pdfs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(pdfs)
}

/// Extract and parse one statement.
///
/// Extraction failures are logged and produce no bookings, so a broken file
/// does not stop a batch.
pub fn load_statement(extractor: &dyn TextExtractor, pdf: &Path) -> Vec<Booking> {
    let source = pdf
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| pdf.display().to_string());

    let lines = match extractor.extract_lines(pdf) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::warn!(file = %pdf.display(), error = %e, "text extraction failed");
            Vec::new()
        }
    };

    let mut bookings = parse_dkb_lines(&lines);
    for b in &mut bookings {
        b.source_file = source.clone();
    }
    tracing::info!(file = %source, bookings = bookings.len(), "parsed statement");
    bookings
}
