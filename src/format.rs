//! Display formatting applied to derived values before they reach a card.
//!
//! Every function that takes an optional point branches on the "no data"
//! case explicitly and returns a placeholder instead.

use crate::trend::TrendPoint;
use crate::utils::parse_date_part;
use chrono::NaiveDate;

pub const NOT_AVAILABLE: &str = "N/A";

const ABBREVIATIONS: [(f64, &str); 4] = [(1e12, "t"), (1e9, "b"), (1e6, "m"), (1e3, "k")];

/// `$1.23k`, `$4.50m`, `$12.00`. Negative values get a leading minus.
pub fn format_compact_currency(value: f64) -> String {
    let magnitude = value.abs();
    let mut tier = ABBREVIATIONS
        .iter()
        .position(|(threshold, _)| magnitude >= *threshold);
    let mut scaled = scaled_to_cents(magnitude, tier);

    // Rounding may carry into the next suffix: 999.999 is $1.00k, not $1000.00.
    if scaled >= 1000.0 {
        let larger = match tier {
            None => Some(ABBREVIATIONS.len() - 1),
            Some(0) => None,
            Some(index) => Some(index - 1),
        };
        if larger.is_some() {
            tier = larger;
            scaled = scaled_to_cents(magnitude, tier);
        }
    }

    let suffix = tier.map(|index| ABBREVIATIONS[index].1).unwrap_or("");
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${:.2}{}", sign, scaled, suffix)
}

fn scaled_to_cents(magnitude: f64, tier: Option<usize>) -> f64 {
    let scaled = match tier {
        Some(index) => magnitude / ABBREVIATIONS[index].0,
        None => magnitude,
    };
    (scaled * 100.0).round() / 100.0
}

/// Value in millions with at most two fraction digits: `$1.23m`, `$1,250m`.
pub fn format_millions(value: f64) -> String {
    format!("${}m", format_grouped(value / 1_000_000.0, 2))
}

/// Axis tick in whole millions: `$3m`.
pub fn format_axis_millions(value: f64) -> String {
    format!("${:.0}m", value / 1_000_000.0)
}

/// `$` plus en-style grouping with at most three fraction digits.
pub fn format_currency(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", format_grouped(-value, 3))
    } else {
        format!("${}", format_grouped(value, 3))
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Two fixed decimals, no grouping.
pub fn format_fixed(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn format_units_sold(quantity: i64) -> String {
    if quantity >= 1000 {
        format!("{:.1}k Sold", quantity as f64 / 1000.0)
    } else {
        format!("{} Sold", quantity)
    }
}

/// `1/2/24`
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%y").to_string()
}

/// `January 2, 2024`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `1/2`
pub fn format_axis_date(date: NaiveDate) -> String {
    date.format("%-m/%-d").to_string()
}

/// Short date of a point, or `N/A` when there is no point or its date does
/// not parse.
pub fn format_point_date<P: TrendPoint>(point: Option<&P>) -> String {
    match point.map(|p| parse_date_part(p.date())) {
        Some(Ok(date)) => format_short_date(date),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Rounds to `max_fraction_digits`, trims trailing zeros and inserts
/// thousands separators.
pub fn format_grouped(value: f64, max_fraction_digits: usize) -> String {
    let factor = 10f64.powi(max_fraction_digits as i32);
    let rounded = (value * factor).round() / factor;
    let text = format!("{:.*}", max_fraction_digits, rounded.abs());

    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, fraction.trim_end_matches('0')),
        None => (text.as_str(), ""),
    };

    let mut output = String::new();
    if rounded < 0.0 {
        output.push('-');
    }
    output.push_str(&group_thousands(integer));
    if !fraction.is_empty() {
        output.push('.');
        output.push_str(fraction);
    }
    output
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
