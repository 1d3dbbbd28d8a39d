// File: crates/star-core/src/format.rs
// Summary: Label formatting for counts and time-axis ticks.

use chrono::{Datelike, NaiveDate};

/// `1234567` -> `"1,234,567"`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Axis-friendly count: `950`, `1.2K`, `3.4M`.
pub fn compact(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// `Jan 2020`.
pub fn month_year(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Elapsed-time tick: days under a month, then months, then years (30/365-day units).
pub fn elapsed_days(days: i64) -> String {
    let days = days.max(0);
    if days < 30 {
        format!("{days}d")
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}

/// Counter label shown under the chart.
pub fn counter_label(count: u64) -> String {
    if count == 1 { "1 star".to_string() } else { format!("{} stars", thousands(count)) }
}

/// `"Rust • Created 2019"`; missing parts are left out.
pub fn info_line(language: &str, created_at: Option<NaiveDate>) -> Option<String> {
    let created = created_at.map(|d| format!("Created {}", d.year()));
    match (language.trim(), created) {
        ("", None) => None,
        ("", Some(c)) => Some(c),
        (lang, None) => Some(lang.to_string()),
        (lang, Some(c)) => Some(format!("{lang} \u{2022} {c}")),
    }
}
