//! Formatting helpers for presenting overlap figures.

use time::{macros::format_description, OffsetDateTime, UtcOffset};

/// Service-supplied percentage, printed as received (`25%`, `33.33%`).
pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{value}%")
    } else {
        "—".to_string()
    }
}

/// Whole count with thin grouping (`12 345`).
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('\u{202f}');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_synced_at(at: OffsetDateTime) -> String {
    at.to_offset(UtcOffset::UTC)
        .format(&format_description!("[hour]:[minute]:[second] UTC"))
        .unwrap_or_else(|_| "—".to_string())
}
