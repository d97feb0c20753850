// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Human-readable daily activity summaries.

use crate::error::Result;
use crate::models::activity::describe;
use crate::models::{ActivityType, DailySummary};
use crate::services::calendar::parse_date;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Key of the placeholder entry for days without activity.
pub const NO_ACTIVITY_KEY: &str = "none";
pub const NO_ACTIVITY_TEXT: &str = "No activity";

/// Describe each activity of a day, keyed by activity type.
///
/// A day without activity yields a single placeholder entry.
pub fn make_summaries(day: &DailySummary) -> Result<BTreeMap<String, String>> {
    let mut summaries = BTreeMap::new();

    if day.summary.is_empty() {
        summaries.insert(NO_ACTIVITY_KEY.to_string(), NO_ACTIVITY_TEXT.to_string());
        return Ok(summaries);
    }

    for entry in &day.summary {
        let kind = ActivityType::from_code(&entry.activity)?;
        summaries.insert(
            kind.as_str().to_string(),
            describe(
                kind.summary_label(),
                entry.distance_meters(),
                entry.duration_seconds(),
            ),
        );
    }

    Ok(summaries)
}

/// One day of the activity overview list.
#[derive(Debug, Clone, Serialize)]
pub struct DayOverview {
    pub date: NaiveDate,
    pub summaries: BTreeMap<String, String>,
    pub day: DailySummary,
}

/// Attach parsed dates and descriptions to summary days, newest first.
pub fn overview_days(days: Vec<DailySummary>) -> Result<Vec<DayOverview>> {
    let mut overview = days
        .into_iter()
        .map(|day| {
            Ok(DayOverview {
                date: parse_date(&day.date)?,
                summaries: make_summaries(&day)?,
                day,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    overview.reverse();
    Ok(overview)
}
