//! Statement amounts in German notation (`1.234,56`, `-12,00`).

use std::fmt;

/// Which side of the account a booking landed on.
///
/// The value is the normalized magnitude (`"1234.56"`); the sign lives in the
/// variant, so a booking can never carry both a debit and a credit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Amount {
    Debit(String),
    Credit(String),
    #[default]
    Empty,
}

impl Amount {
    /// Classify a raw statement amount: a minus sign anywhere means debit.
    pub fn from_statement(raw: &str) -> Self {
        let value = normalize_amount(raw);
        if value.is_empty() {
            Amount::Empty
        } else if raw.contains('-') {
            Amount::Debit(value)
        } else {
            Amount::Credit(value)
        }
    }

    /// Normalized debit value, or `""`.
    pub fn debit(&self) -> &str {
        match self {
            Amount::Debit(v) => v,
            _ => "",
        }
    }

    /// Normalized credit value, or `""`.
    pub fn credit(&self) -> &str {
        match self {
            Amount::Credit(v) => v,
            _ => "",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Amount::Empty)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Debit(v) => write!(f, "-{v} EUR"),
            Amount::Credit(v) => write!(f, "+{v} EUR"),
            Amount::Empty => write!(f, "0,00 EUR"),
        }
    }
}

/// Convert `1.234,56` to `1234.56`.
///
/// Thousands separators are dropped, the decimal comma becomes a point and a
/// leading sign is removed (see [`Amount::from_statement`]).
pub fn normalize_amount(raw: &str) -> String {
    raw.trim()
        .trim_start_matches(['-', '+'])
        .replace('.', "")
        .replace(',', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_thousands() {
        assert_eq!(normalize_amount("1.234,56"), "1234.56");
        assert_eq!(normalize_amount("12.345.678,90"), "12345678.90");
        assert_eq!(normalize_amount("0,99"), "0.99");
    }

    #[test]
    fn test_minus_sign_is_debit() {
        assert_eq!(Amount::from_statement("-12,00"), Amount::Debit("12.00".into()));
        assert_eq!(Amount::from_statement("1.500,00"), Amount::Credit("1500.00".into()));
        assert_eq!(Amount::from_statement(""), Amount::Empty);
    }

    #[test]
    fn test_sides_are_exclusive() {
        let debit = Amount::from_statement("-3,50");
        assert_eq!(debit.debit(), "3.50");
        assert_eq!(debit.credit(), "");

        let credit = Amount::from_statement("3,50");
        assert_eq!(credit.debit(), "");
        assert_eq!(credit.credit(), "3.50");

        assert_eq!(Amount::Empty.debit(), "");
        assert_eq!(Amount::Empty.credit(), "");
    }

    #[test]
    fn test_display_for_prompt() {
        assert_eq!(Amount::Debit("12.00".into()).to_string(), "-12.00 EUR");
        assert_eq!(Amount::Credit("7.10".into()).to_string(), "+7.10 EUR");
        assert_eq!(Amount::Empty.to_string(), "0,00 EUR");
    }
}
