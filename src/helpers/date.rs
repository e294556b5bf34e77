//! Date helper functions
//!
//! Post dates are kept as `YYYY-MM-DD` strings; these helpers only format
//! them for display.

use chrono::{Datelike, NaiveDate};

/// How to display a post date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// "January 15, 2024"
    Full,
    /// "Jan 2024"
    Short,
}

impl DateStyle {
    fn chrono_format(self) -> &'static str {
        match self {
            DateStyle::Full => "%B %-d, %Y",
            DateStyle::Short => "%b %Y",
        }
    }
}

/// Parse a `YYYY-MM-DD` post date
pub fn parse_post_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// Format a post date, returning the input unchanged if it is not a date
///
/// # Examples
/// ```ignore
/// format_date("2024-01-15", DateStyle::Full) // -> "January 15, 2024"
/// ```
pub fn format_date(date: &str, style: DateStyle) -> String {
    match parse_post_date(date) {
        Some(d) => d.format(style.chrono_format()).to_string(),
        None => {
            tracing::warn!("Invalid date string: {}", date);
            date.to_string()
        }
    }
}

/// Describe a post date relative to `today` ("Yesterday", "3 days ago", ...)
pub fn relative_date(date: &str, today: NaiveDate) -> String {
    let Some(d) = parse_post_date(date) else {
        tracing::warn!("Invalid date string for relative time: {}", date);
        return date.to_string();
    };

    let days = today.signed_duration_since(d).num_days();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=29 => {
            let weeks = days / 7;
            format!("{} week{} ago", weeks, if weeks > 1 { "s" } else { "" })
        }
        _ => format_date(date, DateStyle::Short),
    }
}

/// Current calendar year, for the footer
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
