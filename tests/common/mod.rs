// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use moves_geojson::error::RemoteFetchError;
use moves_geojson::models::{DailySummary, Profile, StorylineDay};
use moves_geojson::services::{MovesApi, MovesService, YearMonth};
use moves_geojson::store::MemoryStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
pub const STORYLINE_FIXTURE: &str = include_str!("../fixtures/storyline_20131231.json");

#[allow(dead_code)]
pub const USER_ID: u64 = 23138311640030064;

/// Fixed "now" used by the test service: 2014-01-15 12:00 UTC.
#[allow(dead_code)]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2014, 1, 15, 12, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Profile for a UTC account that started on 2013-01-15.
#[allow(dead_code)]
pub fn test_profile() -> Profile {
    serde_json::from_value(serde_json::json!({
        "userId": USER_ID,
        "profile": {
            "firstDate": "20130115",
            "currentTimeZone": {"id": "UTC", "offset": 0}
        }
    }))
    .unwrap()
}

/// The fixture storyline day.
#[allow(dead_code)]
pub fn fixture_day() -> StorylineDay {
    let days: Vec<StorylineDay> = serde_json::from_str(STORYLINE_FIXTURE).unwrap();
    days.into_iter().next().unwrap()
}

/// In-process Moves API that counts calls and can be told to fail.
#[allow(dead_code)]
pub struct FakeMovesApi {
    pub profile: Profile,
    pub profile_calls: AtomicUsize,
    pub storyline_calls: AtomicUsize,
    pub summary_calls: AtomicUsize,
    pub recent_calls: AtomicUsize,
    failure: Mutex<Option<RemoteFetchError>>,
}

#[allow(dead_code)]
impl FakeMovesApi {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            profile_calls: AtomicUsize::new(0),
            storyline_calls: AtomicUsize::new(0),
            summary_calls: AtomicUsize::new(0),
            recent_calls: AtomicUsize::new(0),
            failure: Mutex::new(None),
        }
    }

    /// Make every following call fail with `err` (or succeed again with `None`).
    pub fn fail_with(&self, err: Option<RemoteFetchError>) {
        *self.failure.lock().unwrap() = err;
    }

    fn check(&self) -> Result<(), RemoteFetchError> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn storyline_calls(&self) -> usize {
        self.storyline_calls.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    pub fn summary_calls(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }
}

impl MovesApi for FakeMovesApi {
    async fn profile(&self, _access_token: &str) -> Result<Profile, RemoteFetchError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.profile.clone())
    }

    async fn daily_storyline(
        &self,
        _access_token: &str,
        date: NaiveDate,
    ) -> Result<Vec<StorylineDay>, RemoteFetchError> {
        self.storyline_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut day = fixture_day();
        day.date = date.format("%Y%m%d").to_string();
        Ok(vec![day])
    }

    async fn monthly_summary(
        &self,
        _access_token: &str,
        month: YearMonth,
    ) -> Result<Vec<DailySummary>, RemoteFetchError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let day = serde_json::json!({
            "date": month.first_day().format("%Y%m%d").to_string(),
            "summary": [{"activity": "wlk", "distance": 812.0, "duration": 720.0}]
        });
        Ok(vec![serde_json::from_value(day).unwrap()])
    }

    async fn recent_summary(
        &self,
        _access_token: &str,
        past_days: u32,
    ) -> Result<Vec<DailySummary>, RemoteFetchError> {
        self.recent_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let today = fixed_now().date_naive();
        Ok((0..past_days as u64)
            .rev()
            .map(|back| {
                let day = today - chrono::Days::new(back);
                serde_json::from_value(serde_json::json!({
                    "date": day.format("%Y%m%d").to_string(),
                    "summary": null
                }))
                .unwrap()
            })
            .collect())
    }
}

#[allow(dead_code)]
pub type TestService = MovesService<MemoryStore, Arc<FakeMovesApi>>;

/// Create a service over a fresh in-memory store and fake API, with the
/// clock pinned to `fixed_now()`.
#[allow(dead_code)]
pub fn create_test_service() -> (TestService, Arc<FakeMovesApi>) {
    create_test_service_for(test_profile())
}

#[allow(dead_code)]
pub fn create_test_service_for(profile: Profile) -> (TestService, Arc<FakeMovesApi>) {
    let api = Arc::new(FakeMovesApi::new(profile));
    let service = MovesService::new(MemoryStore::new(), api.clone()).with_clock(fixed_now);
    (service, api)
}
