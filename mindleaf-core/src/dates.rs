use crate::keywords::{Keyword, Keywords};
use chrono::{
    Datelike, Duration, NaiveDate,
    format::{Item, StrftimeItems},
};
use std::fmt::Write;

pub const DEFAULT_FORMATS: &[&str] = &["%Y-%m-%d"];

/// Resolves user input to a calendar date.
///
/// Accepts `today`, `yesterday`, `tomorrow`, a weekday name (the most recent
/// such day, `reference` included), any registered synonym, or a date in one
/// of `formats`. `YYYY-MM-DD` is always accepted.
pub fn resolve_date<S: AsRef<str>>(input: &str, reference: NaiveDate, formats: &[S]) -> Option<NaiveDate> {
    let input = input.trim();
    if let Some(keyword) = Keywords::lookup(input) {
        return Some(match keyword {
            Keyword::Today => reference,
            Keyword::Yesterday => reference - Duration::days(1),
            Keyword::Tomorrow => reference + Duration::days(1),
            _ => {
                let wd = keyword.weekday()?.num_days_from_monday();
                let today = reference.weekday().num_days_from_monday();
                let days_ago = (today + 7 - wd) % 7;
                reference - Duration::days(days_ago as i64)
            }
        });
    }

    formats
        .iter()
        .map(S::as_ref)
        .chain(DEFAULT_FORMATS.iter().copied())
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}

/// Whether chrono can render `format` (no unknown `%` specifiers).
pub fn is_valid_format(format: &str) -> bool {
    StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

/// Renders `date` with `format`, falling back to `YYYY-MM-DD` when the
/// format cannot be rendered.
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", date.format(format)) {
        Ok(()) => out,
        Err(_) => date.format("%Y-%m-%d").to_string(),
    }
}
