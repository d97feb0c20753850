// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod profile;
pub mod storyline;
pub mod summary;

pub use activity::ActivityType;
pub use profile::{AccountInfo, Profile};
pub use storyline::{Activity, Location, Place, Segment, SegmentKind, StorylineDay, TrackPoint};
pub use summary::{ActivitySummary, DailySummary};

use serde::{Deserialize, Deserializer};
use serde_json::Number;

/// Deserialize a list that Moves may send as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read an optional Moves number as `f64`, zero when absent.
fn number_or_zero(value: Option<&Number>) -> f64 {
    value.and_then(Number::as_f64).unwrap_or(0.0)
}
