// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod cache;
pub mod calendar;
pub mod geojson;
pub mod moves;
pub mod summaries;

pub use cache::{CacheCoordinator, CachePolicy, CACHE_TTL};
pub use calendar::{days_since, days_using, month_range, parse_date, parse_month, YearMonth};
pub use geojson::transform_day;
pub use moves::{MovesApi, MovesClient, MovesService};
pub use summaries::{make_summaries, overview_days, DayOverview};
