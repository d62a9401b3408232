//! DKB (Deutsche Kreditbank) account statement parser (text)
//!
//! Expected `pdftotext -layout` output:
//!   02.01.2024  Kartenzahlung                              -42,17
//!               REWE Markt GmbH Berlin
//!               2024-01-01 Debitk.12 VISA Debit
//!   03.01.2024  Gutschrift                              1.250,00
//!               ACME GmbH Gehalt Januar
//!   Kontostand am 31.01.2024                            3.118,40

use std::sync::LazyLock;

use auszug_core::{Amount, Booking};
use regex::Regex;

use crate::text::split_lines;

// ASCII digits only; `\d` would also accept other scripts' digits.
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4}").unwrap());

static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[0-9]{1,3}(?:\.[0-9]{3})*,[0-9]{2}").unwrap());

// Balance, totals, overdraft, footnotes, bank imprint, page footer.
static END_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)(Kontostand am|Gesamtumsatzsummen|Ihr Dispositionskredit|",
        r"Hinweise zum Kontoauszug|Deutsche Kreditbank AG|Seite \d+ von)"
    ))
    .unwrap()
});

const DATE_WIDTH: usize = 10;
const BOOKING_TYPE_WIDTH: usize = 20;

/// Parse extracted statement text into bookings.
pub fn parse_dkb_text(text: &str) -> Vec<Booking> {
    parse_dkb_lines(&split_lines(text))
}

/// Group statement lines into bookings.
///
/// A `DD.MM.YYYY` line opens a booking, the lines after it are its text.
/// The first end marker closes the open booking and ends the listing; the rest
/// of the statement is boilerplate.
pub fn parse_dkb_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Booking> {
    let mut out = Vec::new();
    let mut current: Option<Booking> = None;

    for line in lines {
        let line = line.as_ref().trim_end();

        if let Some(header) = parse_header(line) {
            if let Some(done) = current.take() {
                out.push(done);
            }
            current = Some(header);
            continue;
        }

        let Some(booking) = current.as_mut() else {
            continue;
        };

        if END_MARKER_RE.is_match(line) {
            tracing::debug!(line, "end marker, stopping");
            out.extend(current.take());
            break;
        }

        let clean = line.trim();
        if clean.chars().count() < 2 {
            continue;
        }
        booking.push_text(clean);
    }

    out.extend(current);
    out
}

/// A header line: date, booking type and amount. `None` if `line` does not
/// open a booking.
fn parse_header(line: &str) -> Option<Booking> {
    if !DATE_RE.is_match(line) {
        return None;
    }
    let (date, rest) = line.split_at_checked(DATE_WIDTH)?;
    let rest = rest.trim();

    let mut booking = Booking::new(date);

    // Some layouts print the running balance before the amount; the last one wins.
    if let Some(m) = AMOUNT_RE.find_iter(rest).last() {
        booking.amount = Amount::from_statement(m.as_str());
    }

    booking.booking_type = rest
        .chars()
        .take(BOOKING_TYPE_WIDTH)
        .collect::<String>()
        .trim()
        .to_string();

    Some(booking)
}
