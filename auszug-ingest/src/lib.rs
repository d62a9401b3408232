//! auszug-ingest: PDF text extraction and bank-specific statement parsers.

pub mod extract;
pub mod parsers;
pub mod statement;
pub mod text;

pub use extract::{ExtractError, Pdftotext, TextExtractor};
pub use parsers::dkb::{parse_dkb_lines, parse_dkb_text};
pub use statement::{list_pdfs, load_statement};
pub use text::split_lines;
