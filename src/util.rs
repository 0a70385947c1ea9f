// Utility helpers for parsing and formatting.
//
// This module centralizes the "dirty" date/number handling so the rest of
// the code can assume clean, typed values.
use chrono::{NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a date cell while being forgiving about the formats that show up
/// in spreadsheet exports: plain dates in a few separator/order variants,
/// plus datetime strings whose date part parses.
///
/// Returns `None` for anything that cannot be parsed, including empty
/// strings; the loader drops such rows.
pub fn parse_date_flexible(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values. This is used
    // for counts in console messages (e.g., `9,855 rows read`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_common_date_formats() {
        assert_eq!(parse_date_flexible("2024-01-05"), Some(d(2024, 1, 5)));
        assert_eq!(parse_date_flexible("2024/01/05"), Some(d(2024, 1, 5)));
        assert_eq!(parse_date_flexible("05/01/2024"), Some(d(2024, 1, 5)));
        assert_eq!(parse_date_flexible("05.01.2024"), Some(d(2024, 1, 5)));
        assert_eq!(parse_date_flexible(" 2024-01-05 "), Some(d(2024, 1, 5)));
    }

    #[test]
    fn parses_datetime_prefixes() {
        assert_eq!(
            parse_date_flexible("2024-01-05 14:30:00"),
            Some(d(2024, 1, 5))
        );
        assert_eq!(
            parse_date_flexible("2024-01-05T14:30:00"),
            Some(d(2024, 1, 5))
        );
    }

    #[test]
    fn rejects_garbage_and_empty() {
        assert_eq!(parse_date_flexible(""), None);
        assert_eq!(parse_date_flexible("   "), None);
        assert_eq!(parse_date_flexible("not-a-date"), None);
        assert_eq!(parse_date_flexible("2024-13-40"), None);
    }

    #[test]
    fn format_int_inserts_separators() {
        assert_eq!(format_int(9855u64), "9,855");
        assert_eq!(format_int(12u64), "12");
    }
}
