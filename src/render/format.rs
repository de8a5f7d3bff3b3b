//! Cell formatting for dashboard tables

use num_format::{Locale, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder for values the upstream did not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// Names longer than this are cut and suffixed with an ellipsis
pub const NAME_MAX_CHARS: usize = 10;

/// Shorten `name` to [`NAME_MAX_CHARS`] characters plus `...`
pub fn truncate_name(name: &str) -> String {
    match name.char_indices().nth(NAME_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &name[..cut]),
        None => name.to_string(),
    }
}

/// Round half away from zero to exactly `dp` decimal places
fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded.to_string()
}

/// `$` followed by two decimals, or `N/A`
pub fn format_price(price: Option<Decimal>) -> String {
    match price {
        Some(p) => format!("${}", fixed(p, 2)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Two decimals followed by `%`, or `N/A`
pub fn format_change(change: Option<Decimal>) -> String {
    match change {
        Some(c) => format!("{}%", fixed(c, 2)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `$` followed by an en-US grouped amount, or `N/A`
pub fn format_usd_grouped(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("${}", group_thousands(v)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Market cap rank, or `N/A`
pub fn format_rank(rank: Option<u32>) -> String {
    rank.map(|r| r.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Group the integer part in threes with commas, keeping at most three
/// fraction digits (en-US locale style)
pub fn group_thousands(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let magnitude = rounded.abs();
    // Decimal's mantissa is 96 bits, so the integer part always fits.
    let int_part = magnitude.trunc().to_u128().unwrap_or_default();

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&int_part.to_formatted_string(&Locale::en));
    if let Some((_, frac)) = magnitude.to_string().split_once('.') {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Escape text for inclusion in HTML element content
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
