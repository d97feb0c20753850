// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Memoize-or-fetch over a shared cache store.
//!
//! Values are stored as JSON. A store that is down or holds an undecodable
//! value behaves like a miss, so the cache never turns a working remote call
//! into a failed request. Failed fetches are never stored.

use crate::error::{RemoteFetchError, Result};
use crate::store::CacheStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

/// Fixed lifetime of every cache entry (24 hours).
pub const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Whether a freshly fetched record may be written to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    Store,
    /// The record is still changing upstream (e.g. today's storyline).
    Skip,
}

impl CachePolicy {
    pub fn store_if(cacheable: bool) -> Self {
        if cacheable {
            CachePolicy::Store
        } else {
            CachePolicy::Skip
        }
    }
}

/// Wraps a `CacheStore` with the memoize-or-fetch protocol.
#[derive(Clone)]
pub struct CacheCoordinator<S> {
    store: S,
    ttl: Duration,
}

impl<S: CacheStore> CacheCoordinator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            ttl: CACHE_TTL,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return the cached record for `key`, or call `fetch` and cache its
    /// result when `policy` allows.
    ///
    /// Hits are returned as stored, without re-validation.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &str, policy: CachePolicy, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, RemoteFetchError>>,
    {
        match self.store.get(key).await {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(record) => {
                    tracing::debug!(key, "Cache hit");
                    return Ok(record);
                }
                Err(e) => {
                    tracing::warn!(key, error = %e, "Undecodable cache entry, refetching");
                }
            },
            Ok(None) => tracing::debug!(key, "Cache miss"),
            Err(e) => tracing::warn!(key, error = %e, "Cache read failed, fetching"),
        }

        let record = fetch().await?;

        if policy == CachePolicy::Skip {
            tracing::debug!(key, "Record still changing upstream, not cached");
            return Ok(record);
        }

        match serde_json::to_vec(&record) {
            Ok(bytes) => {
                if let Err(e) = self.store.set(key, &bytes, self.ttl).await {
                    tracing::warn!(key, error = %e, "Cache write failed");
                }
            }
            Err(e) => tracing::warn!(key, error = %e, "Failed to encode record for cache"),
        }

        Ok(record)
    }
}
