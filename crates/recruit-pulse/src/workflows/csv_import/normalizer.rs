use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Lenient date parsing; unparseable values count as missing.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.date());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    debug!(value = trimmed, "ignoring unparseable date");
    None
}

pub(crate) fn parse_optional_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(parse_date)
}

/// Non-negative whole number, tolerating a trailing `.0` from spreadsheet exports.
pub(crate) fn parse_count(value: Option<&str>) -> Option<u32> {
    let trimmed = value?.trim();
    let digits = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    match digits.parse::<u32>() {
        Ok(count) => Some(count),
        Err(_) => {
            debug!(value = trimmed, "ignoring unparseable count");
            None
        }
    }
}

/// Star rating in 0..=5; anything else is treated as missing.
pub(crate) fn parse_rating(value: Option<&str>) -> Option<u8> {
    parse_count(value)
        .filter(|rating| *rating <= 5)
        .map(|rating| rating as u8)
}

pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "y" | "x" | "si" | "sì"
    )
}

pub(crate) fn normalize_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
