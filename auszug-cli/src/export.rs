//! CSV export of enriched bookings.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use auszug_core::Booking;

pub const HEADER: [&str; 7] = [
    "Datum",
    "Buchungsart",
    "Name",
    "Beschreibung",
    "Betrag_Soll_EUR",
    "Betrag_Haben_EUR",
    "Quelldatei",
];

pub fn write_csv(path: &Path, bookings: &[Booking]) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_bookings(file, bookings).with_context(|| format!("write {}", path.display()))
}

pub fn write_bookings<W: Write>(out: W, bookings: &[Booking]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);

    wtr.write_record(HEADER)?;
    for b in bookings {
        wtr.write_record([
            b.date.as_str(),
            b.booking_type.as_str(),
            b.name.trim(),
            b.description.trim(),
            b.debit(),
            b.credit(),
            b.source_file.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use auszug_core::Amount;

    fn to_string(bookings: &[Booking]) -> String {
        let mut buf = Vec::new();
        write_bookings(&mut buf, bookings).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_only() {
        assert_eq!(
            to_string(&[]),
            "Datum,Buchungsart,Name,Beschreibung,Betrag_Soll_EUR,Betrag_Haben_EUR,Quelldatei\r\n"
        );
    }

    #[test]
    fn test_rows_in_order() {
        let mut debit = Booking::new("02.01.2024");
        debit.booking_type = "Lastschrift".into();
        debit.name = " PayPal ".into();
        debit.description = "1043, Spotify".into();
        debit.amount = Amount::Debit("12.99".into());
        debit.source_file = "2024-01.pdf".into();

        let mut credit = Booking::new("03.01.2024");
        credit.booking_type = "Gutschrift".into();
        credit.name = "ACME".into();
        credit.amount = Amount::Credit("2100.00".into());
        credit.source_file = "2024-01.pdf".into();

        let mut none = Booking::new("04.01.2024");
        none.booking_type = "Abschluss".into();

        let csv = to_string(&[debit, credit, none]);
        let lines: Vec<_> = csv.split("\r\n").collect();
        assert_eq!(lines[1], r#"02.01.2024,Lastschrift,PayPal,"1043, Spotify",12.99,,2024-01.pdf"#);
        assert_eq!(lines[2], "03.01.2024,Gutschrift,ACME,,,2100.00,2024-01.pdf");
        assert_eq!(lines[3], "04.01.2024,Abschluss,,,,,");
        assert_eq!(lines[4], "");
    }

    #[test]
    fn test_write_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&path, &[Booking::new("01.01.2024")]).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("Datum,"));
        assert!(raw.contains("01.01.2024,,,,,,"));
    }
}
