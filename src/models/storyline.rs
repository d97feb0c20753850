// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Moves daily storyline model.
//!
//! Records keep any field they don't name in `extra`, so a record
//! serializes back with every field Moves sent.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// One day of timeline from `GET /user/storyline/daily/{date}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorylineDay {
    /// Date (YYYYMMDD)
    pub date: String,
    /// Moves sends `null` for days without data
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub segments: Vec<Segment>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single timeline entry: a stay at a place or a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Segment tag ("place" or "move")
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<Place>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<Activity>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Recognized segment tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Place,
    Move,
}

impl Segment {
    /// Classify this segment by its tag.
    pub fn kind(&self) -> Result<SegmentKind, AppError> {
        match self.kind.as_str() {
            "place" => Ok(SegmentKind::Place),
            "move" => Ok(SegmentKind::Move),
            other => Err(AppError::UnrecognizedSegment(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foursquare_id: Option<String>,
    pub location: Location,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// One activity inside a move segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Moves activity code (e.g. "wlk")
    pub activity: String,
    /// Distance in meters, as sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<Number>,
    /// Duration in seconds, as sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Number>,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub track_points: Vec<TrackPoint>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Activity {
    /// Distance in meters, zero when Moves omitted it.
    pub fn distance_meters(&self) -> f64 {
        super::number_or_zero(self.distance.as_ref())
    }

    /// Duration in seconds, zero when Moves omitted it.
    pub fn duration_seconds(&self) -> f64 {
        super::number_or_zero(self.duration.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    /// Timestamp (YYYYMMDDTHHMMSSZ)
    pub time: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
