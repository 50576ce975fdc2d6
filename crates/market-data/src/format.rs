//! Display formatting for resolved prices and statistics.
//!
//! Pure functions consumed by the presentation layer. Absent, non-finite or
//! out-of-domain inputs render [`PLACEHOLDER`] instead of failing.

use chrono::{DateTime, Utc};

/// Rendered in place of any missing value.
pub const PLACEHOLDER: &str = "—";

/// Prices at or above this render with [`FIXED_DECIMALS`] decimals.
const SMALL_PRICE_THRESHOLD: f64 = 0.01;

const FIXED_DECIMALS: usize = 4;

/// Significant digits kept for sub-threshold values.
const SIGNIFICANT_DIGITS: i32 = 4;

/// Beyond this many decimals, fall back to scientific notation.
const MAX_DECIMALS: usize = 18;

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// `$1,234.5678`, `$0.0500`, `$0.00000123`, `$1.234e-16`.
///
/// # Examples
///
/// ```
/// use pricebot_market_data::format::format_usd;
///
/// assert_eq!(format_usd(Some(0.00000123)), "$0.00000123");
/// assert_eq!(format_usd(Some(0.05)), "$0.0500");
/// assert_eq!(format_usd(None), "—");
/// ```
pub fn format_usd(value: Option<f64>) -> String {
    let Some(value) = usable(value) else {
        return PLACEHOLDER.to_string();
    };

    if value < SMALL_PRICE_THRESHOLD {
        match significant(value) {
            // Rounding can carry the value up to the threshold.
            Some(text) if text.parse::<f64>().is_ok_and(|v| v < SMALL_PRICE_THRESHOLD) => {
                return format!("${}", text);
            }
            Some(_) => {}
            None => return format!("${:.3e}", value),
        }
    }

    format!("${}", group_thousands(&format!("{:.*}", FIXED_DECIMALS, value)))
}

/// Whole-dollar amount for statistics: `$50,000`.
pub fn format_usd_whole(value: Option<f64>) -> String {
    match usable(value) {
        Some(value) => format!("${}", group_thousands(&format!("{:.0}", value))),
        None => PLACEHOLDER.to_string(),
    }
}

/// Token amount: `813,008` for large amounts, `0.0042` below one unit.
pub fn format_quantity(value: Option<f64>) -> String {
    let Some(value) = usable(value) else {
        return PLACEHOLDER.to_string();
    };

    if value >= 1.0 {
        return group_thousands(&format!("{:.0}", value));
    }

    significant(value).unwrap_or_else(|| format!("{:.3e}", value))
}

/// Signed percentage with two decimals: `+1.23%`, `-3.45%`.
pub fn format_percent_change(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(value) => format!("{:+.2}%", value),
        None => PLACEHOLDER.to_string(),
    }
}

/// `12m ago` below an hour, `5h ago` up to two days, `3d ago` beyond.
/// Timestamps in the future render as `0m ago`.
pub fn format_relative_time(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(timestamp) = timestamp else {
        return PLACEHOLDER.to_string();
    };

    let elapsed_ms = (now - timestamp).num_milliseconds().max(0) as f64;
    let minutes = (elapsed_ms / 60_000.0).round();
    if minutes < 60.0 {
        return format!("{}m ago", minutes as i64);
    }

    let hours = (minutes / 60.0).round();
    if hours <= 48.0 {
        return format!("{}h ago", hours as i64);
    }

    format!("{}d ago", (hours / 24.0).round() as i64)
}

/// Render a positive value below one with enough decimals to show
/// [`SIGNIFICANT_DIGITS`] significant digits, trailing zeros trimmed.
/// `None` when that would need more than [`MAX_DECIMALS`] decimals.
fn significant(value: f64) -> Option<String> {
    let magnitude = value.log10().floor() as i32;
    let decimals = (SIGNIFICANT_DIGITS - 1 - magnitude).max(0) as usize;
    if decimals > MAX_DECIMALS {
        return None;
    }
    Some(trim_zeros(&format!("{:.*}", decimals, value)))
}

fn trim_zeros(number: &str) -> String {
    if number.contains('.') {
        number
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        number.to_string()
    }
}

/// Insert `,` between thousands in the integer part of a decimal string.
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}
