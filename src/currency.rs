//! Currency Helpers Module
//! Formats and parses pt-BR amounts ("R$ 1.234,56").

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurrencyError {
    #[error("Invalid currency amount: {0:?}")]
    Invalid(String),
}

/// Format a value as Brazilian reais, e.g. `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    let total_cents = (value * 100.0).round() as i64;
    let sign = if total_cents < 0 { "-" } else { "" };
    let cents = total_cents.unsigned_abs();
    format!(
        "R$ {sign}{},{:02}",
        group_digits(cents / 100, '.'),
        cents % 100
    )
}

/// Group an integer with thousands separators, e.g. `1234567` -> `1,234,567`.
pub fn format_count(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{}", group_digits(value.unsigned_abs(), ','))
}

/// Parse a pt-BR formatted amount ("1.234,56"); an `R$` prefix is tolerated.
pub fn parse_brl(text: &str) -> Result<f64, CurrencyError> {
    let trimmed = text.trim();
    let bare = trimmed
        .strip_prefix("R$")
        .map(str::trim_start)
        .unwrap_or(trimmed);
    let normalized = bare.replace('.', "").replace(',', ".");
    normalized
        .parse()
        .map_err(|_| CurrencyError::Invalid(text.to_string()))
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_reais_with_grouping() {
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(9.9), "R$ 9,90");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_brl(-1234.5), "R$ -1.234,50");
        assert_eq!(format_brl(-0.004), "R$ 0,00");
    }

    #[test]
    fn formats_counts() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
        assert_eq!(format_count(-50), "-50");
    }

    #[test]
    fn parses_masked_input() {
        assert_eq!(parse_brl("1.234,56").unwrap(), 1234.56);
        assert_eq!(parse_brl("10,00").unwrap(), 10.0);
        assert_eq!(parse_brl("R$ 2.500,75").unwrap(), 2500.75);
        assert_eq!(parse_brl(" 0,99 ").unwrap(), 0.99);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_brl("abc").is_err());
        assert!(parse_brl("").is_err());
        assert!(parse_brl("R$").is_err());
    }

    #[test]
    fn round_trips_through_format() {
        let value = parse_brl("12.345,67").unwrap();
        assert_eq!(format_brl(value), "R$ 12.345,67");
    }
}
