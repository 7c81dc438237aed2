//! Display formatting helpers
//!
//! Stateless string formatting used by feed and listing screens: absolute
//! and relative dates, abbreviated engagement counts, currency amounts,
//! and text truncation. UI copy goes through the translator; these only
//! shape values.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime};

const DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;
const RELATIVE_CUTOFF_DAYS: i64 = 7;

/// Format a timestamp as a short absolute date, e.g. `Jan 5, 2026`.
pub fn format_date(date: OffsetDateTime) -> String {
    date.format(&DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Format a timestamp relative to `now`, e.g. `2 hours ago`.
///
/// Within a minute it is `just now`; past a week it falls back to the
/// absolute date. Timestamps in the future (clock skew between client
/// and backend) also read `just now` rather than a negative distance.
pub fn format_relative_time(date: OffsetDateTime, now: OffsetDateTime) -> String {
    let elapsed = now - date;
    if elapsed < Duration::seconds(SECONDS_PER_MINUTE) {
        return "just now".to_string();
    }
    let seconds = elapsed.whole_seconds();
    if seconds < SECONDS_PER_HOUR {
        return plural(seconds / SECONDS_PER_MINUTE, "minute");
    }
    if seconds < SECONDS_PER_DAY {
        return plural(seconds / SECONDS_PER_HOUR, "hour");
    }
    if seconds < RELATIVE_CUTOFF_DAYS * SECONDS_PER_DAY {
        return plural(seconds / SECONDS_PER_DAY, "day");
    }
    format_date(date)
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Abbreviate an engagement count: `950`, `1.5K`, `3.4M`.
///
/// One decimal is kept at each magnitude, so `1000` reads `1.0K`.
pub fn format_number_abbreviated(value: i64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Format a money amount with its currency symbol, e.g. `€120.00`.
///
/// Unknown currency codes are printed as a suffix: `120.00 CHF`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    match currency {
        "EUR" => format!("\u{20ac}{amount:.2}"),
        "USD" => format!("${amount:.2}"),
        "GBP" => format!("\u{a3}{amount:.2}"),
        other => format!("{amount:.2} {other}"),
    }
}

/// Truncate to at most `max_length` characters, appending `...`.
///
/// Operates on characters, not bytes, so multi-byte text is never split
/// mid-scalar. Trailing whitespace before the ellipsis is trimmed.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_length).collect();
    format!("{}...", cut.trim_end())
}
