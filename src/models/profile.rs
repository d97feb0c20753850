//! Moves account profile.

use crate::error::{AppError, Result};
use crate::services::calendar::parse_date;
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile returned by `GET /user/profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Moves user ID (used in cache keys)
    pub user_id: u64,
    pub profile: ProfileDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetails {
    /// First day the account recorded data (YYYYMMDD)
    pub first_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_time_zone: Option<TimeZoneInfo>,
    /// Remaining fields (localization, platform, ...) kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The account's current time zone as reported by Moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeZoneInfo {
    pub id: String,
    /// Offset from UTC in seconds
    pub offset: i32,
}

impl Profile {
    /// First day the account used Moves.
    pub fn first_use_date(&self) -> Result<NaiveDate> {
        parse_date(&self.profile.first_date)
    }

    /// Time zone used to decide what "today" is for this account.
    ///
    /// Falls back to UTC when Moves reports no zone or an out-of-range offset.
    pub fn time_zone(&self) -> FixedOffset {
        self.profile
            .current_time_zone
            .as_ref()
            .and_then(|tz| FixedOffset::east_opt(tz.offset))
            .unwrap_or_else(|| Utc.fix())
    }
}

/// Summary of an account for the info page.
#[derive(Debug, Clone, Serialize)]
pub struct AccountInfo {
    pub user_id: u64,
    pub first_date: NaiveDate,
    pub days_using: i64,
}

impl AccountInfo {
    pub fn from_profile(profile: &Profile, today: NaiveDate) -> Result<Self> {
        let first_date = profile.first_use_date()?;
        if first_date > today {
            return Err(AppError::InvalidDate(format!(
                "first use date {} is after {}",
                first_date, today
            )));
        }
        Ok(Self {
            user_id: profile.user_id,
            first_date,
            days_using: crate::services::calendar::days_using(first_date, today),
        })
    }
}
