//! Order and delivery date parsing.
//!
//! Operators type dates in several layouts, optionally followed by a time of
//! day. Values are compared as date-times against the start of `today`, so an
//! order stamped later today counts as a future order while a delivery due
//! any time today is still in range.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use cutlist_common::normalize_cell;

/// Accepted date layouts, tried in order.
const DATE_FORMATS: [&str; 6] = [
    "%Y/%m/%d",
    "%Y-%m-%d",
    "%Y.%m.%d",
    "%Y年%m月%d日",
    "%m/%d/%Y",
    "%Y%m%d",
];

/// Accepted time-of-day layouts.
const TIME_FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Parses a date cell. A cell without a time part reads as midnight.
/// Returns `None` for empty or unrecognized text.
pub fn parse_order_datetime(raw: &str) -> Option<NaiveDateTime> {
    let normalized = normalize_cell(raw);
    let (date_part, time_part) = split_time(&normalized);
    let date = parse_date(date_part)?;
    let time = match time_part {
        Some(text) => TIME_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(text, format).ok())?,
        None => NaiveTime::MIN,
    };
    Some(date.and_time(time))
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    if text.len() == 8 && text.bytes().all(|b| b.is_ascii_digit()) {
        let (year, rest) = text.split_at(4);
        let (month, day) = rest.split_at(2);
        return NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?);
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Splits off a `" HH:MM[:SS]"` or ISO `"THH:MM"` suffix.
fn split_time(text: &str) -> (&str, Option<&str>) {
    if let Some((date, time)) = text.split_once(char::is_whitespace) {
        return (date, Some(time.trim()));
    }
    match text.find('T') {
        Some(index) if index >= 8 => (&text[..index], Some(&text[index + 1..])),
        _ => (text, None),
    }
}

/// True when `order <= today <= delivery`, with `today` taken at midnight.
pub fn spans_today(order: NaiveDateTime, delivery: NaiveDateTime, today: NaiveDate) -> bool {
    let start_of_day = today.and_time(NaiveTime::MIN);
    order <= start_of_day && start_of_day <= delivery
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_accepted_layouts() {
        let expected = at(2024, 3, 5, 0, 0);
        for raw in [
            "2024/03/05",
            "2024/3/5",
            "2024-03-05",
            "2024.03.05",
            "20240305",
            "2024年3月5日",
            "03/05/2024",
            "２０２４／０３／０５",
        ] {
            assert_eq!(parse_order_datetime(raw), Some(expected), "{raw}");
        }
    }

    #[test]
    fn test_time_of_day_is_kept() {
        assert_eq!(
            parse_order_datetime("2024/03/05 10:30:00"),
            Some(at(2024, 3, 5, 10, 30))
        );
        assert_eq!(
            parse_order_datetime("2024-03-05T08:00"),
            Some(at(2024, 3, 5, 8, 0))
        );
        assert_eq!(parse_order_datetime("2024/03/05 25:00"), None);
    }

    #[test]
    fn test_rejected_values() {
        assert_eq!(parse_order_datetime(""), None);
        assert_eq!(parse_order_datetime("未定"), None);
        assert_eq!(parse_order_datetime("2024/13/01"), None);
        assert_eq!(parse_order_datetime("20241301"), None);
    }

    #[test]
    fn test_spans_today_is_inclusive_at_midnight() {
        let today = date(2024, 6, 1);
        let midnight = at(2024, 6, 1, 0, 0);
        assert!(spans_today(midnight, midnight, today));
        assert!(spans_today(midnight, at(2024, 6, 1, 17, 0), today));
        assert!(!spans_today(at(2024, 6, 1, 9, 0), at(2024, 7, 1, 0, 0), today));
        assert!(!spans_today(at(2024, 6, 2, 0, 0), at(2024, 7, 1, 0, 0), today));
        assert!(!spans_today(at(2024, 5, 1, 0, 0), at(2024, 5, 31, 23, 59), today));
    }
}
