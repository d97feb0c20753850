//! Moves daily activity summaries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// One day from `GET /user/summary/daily`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Date (YYYYMMDD)
    pub date: String,
    /// Per-activity totals; `null` from Moves means no activity
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub summary: Vec<ActivitySummary>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Totals for one activity type on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Moves activity code (e.g. "wlk")
    pub activity: String,
    /// Distance in meters, as sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<Number>,
    /// Duration in seconds, as sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Number>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActivitySummary {
    pub fn distance_meters(&self) -> f64 {
        super::number_or_zero(self.distance.as_ref())
    }

    pub fn duration_seconds(&self) -> f64 {
        super::number_or_zero(self.duration.as_ref())
    }
}
