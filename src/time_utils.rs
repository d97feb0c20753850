// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// Moves timestamp format in UTC, e.g. `20131231T101500Z`.
const MOVES_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";
/// Moves timestamp format with a numeric offset, e.g. `20131231T121500+0200`.
const MOVES_OFFSET_FORMAT: &str = "%Y%m%dT%H%M%S%z";

/// Parse a Moves timestamp into UTC.
pub fn parse_moves_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, MOVES_UTC_FORMAT) {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_str(value, MOVES_OFFSET_FORMAT)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// The calendar date at `now` in the given time zone.
pub fn today_in(now: DateTime<Utc>, zone: FixedOffset) -> NaiveDate {
    now.with_timezone(&zone).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_utc_timestamp() {
        let parsed = parse_moves_timestamp("20131231T101500Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2013, 12, 31, 10, 15, 0).unwrap());
    }

    #[test]
    fn test_parse_offset_timestamp() {
        let parsed = parse_moves_timestamp("20131231T121500+0200").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2013, 12, 31, 10, 15, 0).unwrap());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_moves_timestamp("2013-12-31T10:15:00Z").is_none());
        assert!(parse_moves_timestamp("").is_none());
    }

    #[test]
    fn test_today_in_zone_crosses_midnight() {
        let now = Utc.with_ymd_and_hms(2013, 12, 31, 23, 30, 0).unwrap();
        let helsinki = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            today_in(now, helsinki),
            NaiveDate::from_ymd_opt(2014, 1, 1).unwrap()
        );
        assert_eq!(
            today_in(now, FixedOffset::east_opt(0).unwrap()),
            NaiveDate::from_ymd_opt(2013, 12, 31).unwrap()
        );
    }
}
