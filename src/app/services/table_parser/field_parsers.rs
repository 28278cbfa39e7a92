//! Field parsing utilities for budget table cells
//!
//! This module provides the primitives every layout relies on: German
//! amount parsing, empty-safe integer parsing and whitespace handling.

use crate::{Error, Result};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static INTEGER_PART_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d*$").expect("valid integer part regex"));

/// Parse a German amount string ("1.234,56") into an exact decimal
///
/// Dots are thousands separators, the comma separates the fraction. The
/// fraction is padded and truncated to two digits, so the result always has
/// scale 2. An empty cell parses as zero.
pub fn parse_amount(text: &str) -> Result<Decimal> {
    let cleaned = text.trim().replace('.', "");
    let (integer, fraction) = cleaned.split_once(',').unwrap_or((cleaned.as_str(), ""));

    if !INTEGER_PART_RE.is_match(integer) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::numeric_format(text, "amount"));
    }

    let (sign, digits) = match integer.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", integer.strip_prefix('+').unwrap_or(integer)),
    };
    let digits = if digits.is_empty() { "0" } else { digits };
    let mut fraction: String = fraction.chars().take(2).collect();
    while fraction.len() < 2 {
        fraction.push('0');
    }

    Decimal::from_str(&format!("{}{}.{}", sign, digits, fraction))
        .map_err(|_| Error::numeric_format(text, "amount"))
}

/// Parse an integer, returning `None` for empty cells
pub fn parse_int<T: FromStr>(text: &str) -> Result<Option<T>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| Error::numeric_format(trimmed, "integer"))
}

/// Trim and collapse internal whitespace runs to single spaces
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// Split trimmed text at whitespace runs, into at most `max_parts` parts
///
/// Empty text yields a single empty part.
pub fn split_whitespace(text: &str, max_parts: Option<usize>) -> Vec<&str> {
    let trimmed = text.trim();
    match max_parts {
        Some(limit) => WHITESPACE_RE.splitn(trimmed, limit).collect(),
        None => WHITESPACE_RE.split(trimmed).collect(),
    }
}
