//! A single statement entry as it flows from the parser to the CSV export.

use crate::amount::Amount;

/// One booking parsed from a statement.
///
/// `date`, `booking_type`, `text_block` and `amount` come from the parser and
/// are not touched afterwards. `name` and `description` are filled by the
/// enricher, `source_file` by whoever knows which PDF the lines came from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Booking {
    /// `DD.MM.YYYY`, as printed on the statement
    pub date: String,
    pub booking_type: String,
    /// Continuation lines, trimmed and joined with single spaces
    pub text_block: String,
    pub amount: Amount,
    pub name: String,
    pub description: String,
    pub source_file: String,
}

impl Booking {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Default::default()
        }
    }

    /// Append one continuation line to the text block.
    pub fn push_text(&mut self, line: &str) {
        if !self.text_block.is_empty() {
            self.text_block.push(' ');
        }
        self.text_block.push_str(line);
    }

    pub fn debit(&self) -> &str {
        self.amount.debit()
    }

    pub fn credit(&self) -> &str {
        self.amount.credit()
    }
}
