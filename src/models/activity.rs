// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Moves activity types and their display vocabulary.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The activity types Moves reports. Lookups over this enum are exhaustive;
/// any other code is rejected when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Walk,
    Transport,
    Run,
    Cycle,
}

impl ActivityType {
    /// Parse a Moves activity code (`wlk`, `trp`, `run`, `cyc`, or the long
    /// group names newer API versions send).
    pub fn from_code(code: &str) -> Result<Self, AppError> {
        match code {
            "wlk" | "walk" | "walking" => Ok(ActivityType::Walk),
            "trp" | "transport" => Ok(ActivityType::Transport),
            "run" | "running" => Ok(ActivityType::Run),
            "cyc" | "cycle" | "cycling" => Ok(ActivityType::Cycle),
            other => Err(AppError::UnrecognizedActivity(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::Walk => "walk",
            ActivityType::Transport => "transport",
            ActivityType::Run => "run",
            ActivityType::Cycle => "cycle",
        }
    }

    /// Label used when describing a single movement on the map.
    pub fn movement_label(self) -> &'static str {
        match self {
            ActivityType::Walk => "Walking",
            ActivityType::Transport => "Transport",
            ActivityType::Run => "Running",
            ActivityType::Cycle => "Cycling",
        }
    }

    /// Label used in daily summaries ("Walked for 2.1 km, ...").
    pub fn summary_label(self) -> &'static str {
        match self {
            ActivityType::Walk => "Walked",
            ActivityType::Transport => "Transport",
            ActivityType::Run => "Ran",
            ActivityType::Cycle => "Cycled",
        }
    }

    /// Line color for map rendering.
    pub fn stroke(self) -> &'static str {
        match self {
            ActivityType::Walk => "#00d45a",
            ActivityType::Transport => "#000000",
            ActivityType::Run => "#93139a",
            ActivityType::Cycle => "#00ceef",
        }
    }

    /// Line opacity, when it differs from fully opaque.
    pub fn stroke_opacity(self) -> Option<f64> {
        match self {
            ActivityType::Transport => Some(0.1),
            ActivityType::Walk | ActivityType::Run | ActivityType::Cycle => None,
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable description: `"<label> for <km> km, taking <minutes> minutes"`.
///
/// Kilometres are shown with one decimal; minutes are truncated.
pub fn describe(label: &str, distance_meters: f64, duration_seconds: f64) -> String {
    let km = distance_meters / 1000.0;
    let minutes = (duration_seconds / 60.0).trunc() as i64;
    format!("{} for {:.1} km, taking {} minutes", label, km, minutes)
}
