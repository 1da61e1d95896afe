//! Parsing of monetary amounts delivered as text.
//!
//! Two strategies are offered. [`AmountParsing::Exact`] keeps fractional cents
//! and is the default. [`AmountParsing::Truncate`] reproduces the integer
//! parse the dashboard cards have always used: it reads the leading run of
//! base-10 digits and silently drops everything after it, so `"12.99"` sums
//! as `12`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum AmountParsing {
    #[schemars(
        description = "Integer parse: optional sign followed by leading digits; any fraction or trailing text is discarded."
    )]
    Truncate,

    #[default]
    #[schemars(description = "Exact decimal parse. Fractional cents are retained.")]
    Exact,
}

/// Returns `None` when the text holds no usable number.
pub fn parse_amount(text: &str, mode: AmountParsing) -> Option<f64> {
    match mode {
        AmountParsing::Truncate => parse_truncated(text),
        AmountParsing::Exact => parse_exact(text),
    }
}

fn parse_truncated(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_count = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return None;
    }

    let magnitude: f64 = unsigned[..digit_count].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_exact(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    // rust_decimal tolerates digit separators; amount text never carries them.
    if trimmed.is_empty() || trimmed.contains('_') {
        return None;
    }

    match Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
        Ok(decimal) => decimal.to_f64(),
        // Beyond Decimal's 96-bit mantissa; keep the nearest float.
        Err(_) => trimmed.parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}
