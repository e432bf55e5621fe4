//! Value formatters for `date` and `currency` columns.
//!
//! Both formatters fall back to the value's raw text when it cannot be
//! interpreted, so a malformed field still renders something.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record::value_text;

/// Largest number of decimal digits a currency column may show.
pub const MAX_DECIMALS: u8 = 6;

/// Currency display settings for a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Symbol placed before the amount.
    pub symbol: String,
    /// Digits after the decimal point.
    pub decimals: u8,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            decimals: 2,
        }
    }
}

/// Interpret a value as a calendar date.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and
/// numbers of milliseconds since the Unix epoch.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.date_naive())
        }
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.date_naive())
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
                .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
                .ok()
        }
        _ => None,
    }
}

/// Short date in en-US order (`M/D/YYYY`).
pub fn format_date(value: &Value) -> String {
    match parse_date(value) {
        Some(date) => date.format("%-m/%-d/%Y").to_string(),
        None => value_text(value),
    }
}

/// Interpret a value as a number, accepting numeric strings.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Format a value as a currency amount, e.g. `-$1,234.50`.
pub fn format_currency(value: &Value, format: &CurrencyFormat) -> String {
    let Some(amount) = parse_number(value) else {
        return value_text(value);
    };

    let fixed = format!("{:.*}", format.decimals as usize, amount.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + format.symbol.len() + 4);
    // `-0.00` style output is suppressed once rounding leaves nothing behind.
    if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&format.symbol);
    out.push_str(&group_thousands(whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_date_iso_day() {
        assert_eq!(format_date(&json!("2024-01-15")), "1/15/2024");
    }

    #[test]
    fn test_format_date_rfc3339() {
        assert_eq!(format_date(&json!("2023-11-05T10:30:00Z")), "11/5/2023");
    }

    #[test]
    fn test_format_date_space_separated() {
        assert_eq!(format_date(&json!("2022-03-09 08:00:00")), "3/9/2022");
    }

    #[test]
    fn test_format_date_epoch_millis() {
        assert_eq!(format_date(&json!(0)), "1/1/1970");
        assert_eq!(format_date(&json!(1_700_000_000_000_i64)), "11/14/2023");
    }

    #[test]
    fn test_format_date_fallback() {
        assert_eq!(format_date(&json!("next tuesday")), "next tuesday");
        assert_eq!(format_date(&json!(null)), "");
    }

    #[test]
    fn test_format_currency_default() {
        let format = CurrencyFormat::default();
        assert_eq!(format_currency(&json!(1234.5), &format), "$1,234.50");
        assert_eq!(format_currency(&json!(0), &format), "$0.00");
        assert_eq!(format_currency(&json!(999), &format), "$999.00");
        assert_eq!(format_currency(&json!(1000000), &format), "$1,000,000.00");
    }

    #[test]
    fn test_format_currency_negative_and_strings() {
        let format = CurrencyFormat::default();
        assert_eq!(format_currency(&json!(-42.1), &format), "-$42.10");
        assert_eq!(format_currency(&json!("19.99"), &format), "$19.99");
        assert_eq!(format_currency(&json!(-0.001), &format), "$0.00");
    }

    #[test]
    fn test_format_currency_custom_symbol() {
        let format = CurrencyFormat {
            symbol: "€".to_string(),
            decimals: 0,
        };
        assert_eq!(format_currency(&json!(12345.6), &format), "€12,346");
    }

    #[test]
    fn test_format_currency_fallback() {
        let format = CurrencyFormat::default();
        assert_eq!(format_currency(&json!("free"), &format), "free");
        assert_eq!(format_currency(&json!(true), &format), "true");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
    }
}
