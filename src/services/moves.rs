// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Moves API client for profiles, storylines and summaries.
//!
//! Handles:
//! - Bearer authentication with the caller's access token
//! - Rate limit and token rejection detection
//! - Decoding Moves error payloads into `RemoteFetchError`
//!
//! Retrying is left to callers.

use crate::error::{RemoteErrorReason, RemoteFetchError};
use crate::models::{DailySummary, Profile, StorylineDay};
use crate::services::calendar::{api_date, YearMonth};
use chrono::NaiveDate;
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;

/// Default Moves API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.moves-app.com/api/1.1";

/// The remote calls the cache coordinator depends on.
pub trait MovesApi: Send + Sync {
    fn profile(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<Profile, RemoteFetchError>> + Send;

    /// Storyline for one day, with trackpoints.
    fn daily_storyline(
        &self,
        access_token: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<StorylineDay>, RemoteFetchError>> + Send;

    /// Daily summaries for every day of `month`.
    fn monthly_summary(
        &self,
        access_token: &str,
        month: YearMonth,
    ) -> impl Future<Output = Result<Vec<DailySummary>, RemoteFetchError>> + Send;

    /// Daily summaries for the last `past_days` days, including today.
    fn recent_summary(
        &self,
        access_token: &str,
        past_days: u32,
    ) -> impl Future<Output = Result<Vec<DailySummary>, RemoteFetchError>> + Send;
}

impl<T: MovesApi> MovesApi for Arc<T> {
    async fn profile(&self, access_token: &str) -> Result<Profile, RemoteFetchError> {
        (**self).profile(access_token).await
    }

    async fn daily_storyline(
        &self,
        access_token: &str,
        date: NaiveDate,
    ) -> Result<Vec<StorylineDay>, RemoteFetchError> {
        (**self).daily_storyline(access_token, date).await
    }

    async fn monthly_summary(
        &self,
        access_token: &str,
        month: YearMonth,
    ) -> Result<Vec<DailySummary>, RemoteFetchError> {
        (**self).monthly_summary(access_token, month).await
    }

    async fn recent_summary(
        &self,
        access_token: &str,
        past_days: u32,
    ) -> Result<Vec<DailySummary>, RemoteFetchError> {
        (**self).recent_summary(access_token, past_days).await
    }
}

/// Moves API client.
#[derive(Clone)]
pub struct MovesClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for MovesClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl MovesClient {
    /// Create a client against `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        access_token: &str,
        query: &[(&str, String)],
    ) -> Result<T, RemoteFetchError> {
        tracing::debug!(url, "Moves API request");

        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| RemoteFetchError::new(RemoteErrorReason::Transport, e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, RemoteFetchError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = RemoteFetchError::from_status(status.as_u16(), &body);

            match err.reason {
                RemoteErrorReason::RateLimited => {
                    tracing::warn!(detail = %err.detail, "Moves rate limit hit (429)")
                }
                RemoteErrorReason::Unauthorized => {
                    tracing::info!(detail = %err.detail, "Moves rejected access token")
                }
                _ => tracing::warn!(status = %status, detail = %err.detail, "Moves API error"),
            }

            return Err(err);
        }

        response.json().await.map_err(|e| {
            let mut err = RemoteFetchError::new(
                RemoteErrorReason::MalformedResponse,
                format!("JSON parse error: {}", e),
            );
            err.status = Some(status.as_u16());
            err
        })
    }
}

impl MovesApi for MovesClient {
    async fn profile(&self, access_token: &str) -> Result<Profile, RemoteFetchError> {
        let url = format!("{}/user/profile", self.base_url);
        self.get_json(&url, access_token, &[]).await
    }

    async fn daily_storyline(
        &self,
        access_token: &str,
        date: NaiveDate,
    ) -> Result<Vec<StorylineDay>, RemoteFetchError> {
        let url = format!("{}/user/storyline/daily/{}", self.base_url, api_date(date));
        self.get_json(&url, access_token, &[("trackPoints", "true".to_string())])
            .await
    }

    async fn monthly_summary(
        &self,
        access_token: &str,
        month: YearMonth,
    ) -> Result<Vec<DailySummary>, RemoteFetchError> {
        let url = format!("{}/user/summary/daily/{}", self.base_url, month);
        self.get_json(&url, access_token, &[]).await
    }

    async fn recent_summary(
        &self,
        access_token: &str,
        past_days: u32,
    ) -> Result<Vec<DailySummary>, RemoteFetchError> {
        let url = format!("{}/user/summary/daily", self.base_url);
        self.get_json(&url, access_token, &[("pastDays", past_days.to_string())])
            .await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MovesService - cached access to the Moves API
// ─────────────────────────────────────────────────────────────────────────────

use crate::error::AppError;
use crate::models::AccountInfo;
use crate::services::cache::{CacheCoordinator, CachePolicy};
use crate::store::{keys, CacheStore};
use crate::time_utils::today_in;
use chrono::{DateTime, Utc};

/// How many days the recent-activity overview covers.
pub const RECENT_DAYS: u32 = 30;

/// High-level Moves service that memoizes remote calls in a shared store.
///
/// Caching rules:
/// - Profiles are cached for every access token.
/// - Storylines are cached only for days before today in the account's
///   time zone (UTC when unknown). Today's storyline is always fetched.
/// - Monthly summaries are always cached, including the current month.
#[derive(Clone)]
pub struct MovesService<S, A> {
    cache: CacheCoordinator<S>,
    api: A,
    clock: fn() -> DateTime<Utc>,
}

impl<S: CacheStore, A: MovesApi> MovesService<S, A> {
    pub fn new(store: S, api: A) -> Self {
        Self {
            cache: CacheCoordinator::new(store),
            api,
            clock: Utc::now,
        }
    }

    /// Replace the wall clock used to decide what "today" is.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &S {
        self.cache.store()
    }

    /// Today's date for this account.
    pub fn today_for(&self, profile: &Profile) -> NaiveDate {
        today_in((self.clock)(), profile.time_zone())
    }

    /// Today's date for the account behind `access_token`.
    pub async fn today(&self, access_token: &str) -> Result<NaiveDate, AppError> {
        let profile = self.get_profile(access_token).await?;
        Ok(self.today_for(&profile))
    }

    /// Get the profile for an access token.
    pub async fn get_profile(&self, access_token: &str) -> Result<Profile, AppError> {
        let key = keys::profile(access_token);
        self.cache
            .get_or_fetch(&key, CachePolicy::Store, || self.api.profile(access_token))
            .await
    }

    /// Get the storyline (with trackpoints) for one day.
    pub async fn get_storyline(
        &self,
        access_token: &str,
        date: NaiveDate,
    ) -> Result<StorylineDay, AppError> {
        let profile = self.get_profile(access_token).await?;
        let first = profile.first_use_date()?;
        if date < first {
            return Err(AppError::InvalidDate(format!(
                "{} is before the first day of use ({})",
                date, first
            )));
        }

        let today = self.today_for(&profile);
        let key = keys::storyline(profile.user_id, date);
        let policy = CachePolicy::store_if(date < today);

        tracing::debug!(user_id = profile.user_id, %date, %today, ?policy, "Resolving storyline");

        self.cache
            .get_or_fetch(&key, policy, || async {
                self.api
                    .daily_storyline(access_token, date)
                    .await?
                    .into_iter()
                    .next()
                    .ok_or_else(|| {
                        RemoteFetchError::new(
                            RemoteErrorReason::MalformedResponse,
                            format!("empty storyline for {}", api_date(date)),
                        )
                    })
            })
            .await
    }

    /// Get the daily summaries for a calendar month.
    pub async fn get_summary_month(
        &self,
        access_token: &str,
        month: YearMonth,
    ) -> Result<Vec<DailySummary>, AppError> {
        let profile = self.get_profile(access_token).await?;
        let key = keys::summary_month(profile.user_id, month);
        self.cache
            .get_or_fetch(&key, CachePolicy::Store, || {
                self.api.monthly_summary(access_token, month)
            })
            .await
    }

    /// Get the daily summaries for the last `past_days` days.
    ///
    /// Never cached: the window always ends today.
    pub async fn get_recent_summaries(
        &self,
        access_token: &str,
        past_days: u32,
    ) -> Result<Vec<DailySummary>, AppError> {
        Ok(self.api.recent_summary(access_token, past_days).await?)
    }

    /// User ID, first day of use and days elapsed since.
    pub async fn account_info(&self, access_token: &str) -> Result<AccountInfo, AppError> {
        let profile = self.get_profile(access_token).await?;
        let today = self.today_for(&profile);
        AccountInfo::from_profile(&profile, today)
    }
}
