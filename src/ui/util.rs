use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{Result, TrackerError};

pub(crate) const CURRENCY: &str = "₹";

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"₹1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs().round_dp(2);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-{CURRENCY}{with_commas}.{dec_part}")
    } else {
        format!("{CURRENCY}{with_commas}.{dec_part}")
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Parse a money amount typed by the user. Surrounding whitespace and a
/// leading currency sign are ignored.
pub(crate) fn parse_amount(field: &'static str, input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix(CURRENCY).unwrap_or(trimmed).trim();
    Decimal::from_str(digits)
        .or_else(|_| Decimal::from_scientific(digits))
        .map_err(|_| TrackerError::InvalidInput {
            field,
            value: input.trim().to_string(),
        })
}

/// Parse a row id typed by the user.
pub(crate) fn parse_id(field: &'static str, input: &str) -> Result<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| TrackerError::InvalidInput {
            field,
            value: input.trim().to_string(),
        })
}
