// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Date and month ranges bounded by an account's first day of use.

use crate::error::{AppError, Result};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Parse a calendar date in `YYYYMMDD` or `YYYY-MM-DD` form.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let bytes = input.as_bytes();
    let format = match bytes.len() {
        8 if bytes.iter().all(u8::is_ascii_digit) => "%Y%m%d",
        10 if is_dashed_date(bytes) => "%Y-%m-%d",
        _ => return Err(AppError::InvalidDate(input.to_string())),
    };
    NaiveDate::parse_from_str(input, format).map_err(|_| AppError::InvalidDate(input.to_string()))
}

/// `DDDD-DD-DD`: digits everywhere except the two separators.
fn is_dashed_date(bytes: &[u8]) -> bool {
    bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    })
}

/// Format a date the way the Moves API expects it (`YYYYMMDD`).
pub fn api_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(AppError::InvalidDate(format!("{:04}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The calendar month before this one.
    pub fn previous(&self) -> Option<Self> {
        self.first_day()
            .checked_sub_months(Months::new(1))
            .map(Self::of)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        parse_month(s)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a month in `YYYY-MM` or `YYYYMM` form.
pub fn parse_month(input: &str) -> Result<YearMonth> {
    if !input.is_ascii() {
        return Err(AppError::InvalidDate(input.to_string()));
    }
    let (year, month) = match input.len() {
        7 if input.as_bytes()[4] == b'-' => (&input[0..4], &input[5..7]),
        6 => (&input[0..4], &input[4..6]),
        _ => return Err(AppError::InvalidDate(input.to_string())),
    };
    if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(AppError::InvalidDate(input.to_string()));
    }
    let year: i32 = year
        .parse()
        .map_err(|_| AppError::InvalidDate(input.to_string()))?;
    let month: u32 = month
        .parse()
        .map_err(|_| AppError::InvalidDate(input.to_string()))?;
    YearMonth::new(year, month).map_err(|_| AppError::InvalidDate(input.to_string()))
}

/// Every date from `today` back to `first` inclusive, newest first.
pub fn days_since(first: NaiveDate, today: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut cursor = Some(today);
    while let Some(day) = cursor.filter(|d| *d >= first) {
        days.push(day);
        cursor = day.pred_opt();
    }
    days
}

/// Whole days elapsed between `first` and `today`.
pub fn days_using(first: NaiveDate, today: NaiveDate) -> i64 {
    (today - first).num_days()
}

/// Months from the one containing `anchor` back to the one containing
/// `first`, newest first, skipping `excluding`.
pub fn month_range(
    first: NaiveDate,
    anchor: NaiveDate,
    excluding: Option<YearMonth>,
) -> Vec<YearMonth> {
    let first = YearMonth::of(first);
    let mut months = Vec::new();
    let mut cursor = Some(YearMonth::of(anchor));

    while let Some(month) = cursor.filter(|m| *m >= first) {
        if Some(month) != excluding {
            months.push(month);
        }
        cursor = month.previous();
    }

    months
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    #[test]
    fn test_parse_date_with_and_without_separators() {
        assert_eq!(parse_date("20131231").unwrap(), date(2013, 12, 31));
        assert_eq!(parse_date("2013-12-31").unwrap(), date(2013, 12, 31));
    }

    #[test]
    fn test_parse_date_rejects_bad_input() {
        for bad in [
            "", "2013-1231", "20131301", "20130230", "2013/12/31", "abcdefgh", "+2013123",
            "-201-12-31", "2013-12-3-", "-20131231", "2013--1231",
        ] {
            assert!(
                matches!(parse_date(bad), Err(AppError::InvalidDate(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_month_forms() {
        assert_eq!(parse_month("2013-02").unwrap(), ym(2013, 2));
        assert_eq!(parse_month("201302").unwrap(), ym(2013, 2));
        assert!(parse_month("2013-13").is_err());
        assert!(parse_month("2013-2").is_err());
        assert!(parse_month("2013x02").is_err());
    }

    #[test]
    fn test_year_month_display() {
        assert_eq!(ym(2013, 3).to_string(), "2013-03");
        assert_eq!(ym(2013, 3).previous(), Some(ym(2013, 2)));
        assert_eq!(ym(2013, 1).previous(), Some(ym(2012, 12)));
    }

    #[test]
    fn test_days_since_descending_inclusive() {
        let days = days_since(date(2013, 2, 27), date(2013, 3, 2));
        assert_eq!(
            days,
            vec![date(2013, 3, 2), date(2013, 3, 1), date(2013, 2, 28), date(2013, 2, 27)]
        );
    }

    #[test]
    fn test_days_since_first_after_today() {
        assert!(days_since(date(2013, 3, 3), date(2013, 3, 2)).is_empty());
    }

    #[test]
    fn test_days_using() {
        assert_eq!(days_using(date(2013, 1, 1), date(2013, 1, 31)), 30);
        assert_eq!(days_using(date(2013, 1, 1), date(2013, 1, 1)), 0);
    }

    #[test]
    fn test_month_range() {
        let months = month_range(date(2013, 1, 15), date(2013, 3, 10), None);
        assert_eq!(months, vec![ym(2013, 3), ym(2013, 2), ym(2013, 1)]);
    }

    #[test]
    fn test_month_range_excluding() {
        let months = month_range(date(2013, 1, 15), date(2013, 3, 10), Some(ym(2013, 2)));
        assert_eq!(months, vec![ym(2013, 3), ym(2013, 1)]);
    }

    #[test]
    fn test_month_range_same_month() {
        let first = date(2013, 5, 2);
        let anchor = date(2013, 5, 30);
        assert_eq!(month_range(first, anchor, None), vec![ym(2013, 5)]);
        assert!(month_range(first, anchor, Some(ym(2013, 5))).is_empty());
    }

    #[test]
    fn test_month_range_steps_by_calendar_month() {
        // Anchored on the 31st: stepping by days would skip or repeat months.
        let months = month_range(date(2012, 11, 30), date(2013, 3, 31), None);
        assert_eq!(
            months,
            vec![ym(2013, 3), ym(2013, 2), ym(2013, 1), ym(2012, 12), ym(2012, 11)]
        );
    }
}
