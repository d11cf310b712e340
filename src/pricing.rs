//! # Pricing Module
//!
//! Catalog prices are authored by hand in JSON files and spreadsheets, so a
//! price cell may be a number, a numeric string with a comma decimal
//! separator and a currency sign, or free text such as "ask".
//!
//! [`parse_price`] is the only place that decides what counts as a number.
//! Its policy is deliberately lenient: anything it cannot read yields `None`
//! and callers treat that as a zero contribution to totals.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref CURRENCY_SUFFIX: Regex =
        Regex::new(r"(?i)\s*(?:₽|руб\.?|р\.?|rub)$").expect("Currency suffix pattern should be valid");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("Whitespace pattern should be valid");
}

/// A price exactly as it appears in the catalog source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(serde_json::Number),
    Text(String),
}

impl Price {
    /// Numeric value of the price, if it can be read
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Price::Number(n) => number_amount(n),
            Price::Text(s) => parse_price(s),
        }
    }
}

/// JSON numbers may be written in exponent form (`1e16`, `1e-7`)
fn number_amount(n: &serde_json::Number) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Decimal::from(u));
    }
    let raw = n.to_string();
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}

impl Default for Price {
    fn default() -> Self {
        Price::Text(String::new())
    }
}

impl From<&str> for Price {
    fn from(raw: &str) -> Self {
        Price::Text(raw.to_string())
    }
}

impl From<i64> for Price {
    fn from(value: i64) -> Self {
        Price::Number(value.into())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Number(n) => write!(f, "{n}"),
            Price::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Parse a hand-authored price into an exact decimal amount
///
/// Accepts thousands separators written as spaces (including non-breaking
/// spaces), a comma as decimal separator and a trailing rouble marker.
///
/// # Examples
///
/// ```rust
/// use boutique::pricing::parse_price;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_price("1 499,50 ₽"), Some(Decimal::new(149950, 2)));
/// assert_eq!(parse_price("ask"), None);
/// ```
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let without_currency = CURRENCY_SUFFIX.replace(raw.trim(), "");
    let compact = WHITESPACE.replace_all(&without_currency, "");
    if compact.is_empty() {
        return None;
    }

    Decimal::from_str(&compact.replace(',', ".")).ok()
}

/// Render an amount without trailing zeros (`2500`, `1499.5`)
pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!(parse_price("1000"), Some(Decimal::from(1000)));
    }

    #[test]
    fn test_parse_comma_decimal() {
        assert_eq!(parse_price("12,5"), Some(Decimal::new(125, 1)));
    }

    #[test]
    fn test_parse_rejects_free_text() {
        assert_eq!(parse_price("ask"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("   "), None);
    }

    #[test]
    fn test_format_amount_drops_trailing_zeros() {
        assert_eq!(format_amount(Decimal::new(250000, 2)), "2500");
        assert_eq!(format_amount(Decimal::new(14995, 1)), "1499.5");
    }
}
