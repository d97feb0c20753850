//! Key-value cache stores.
//!
//! The cache coordinator only needs `get` and `set` with a TTL; expiry is
//! the store's job.

pub mod memcache;
pub mod memory;

pub use memcache::MemcacheStore;
pub use memory::MemoryStore;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// A shared byte-oriented key-value store with per-entry TTL.
pub trait CacheStore: Send + Sync {
    /// Fetch a value, `None` when absent or expired.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>, StoreError>> + Send;

    /// Store a value that expires after `ttl`.
    fn set(
        &self,
        key: &str,
        value: &[u8],
        ttl: Duration,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

impl<T: CacheStore> CacheStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), StoreError> {
        (**self).set(key, value, ttl).await
    }
}

/// Errors from cache store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Invalid cache key: {0:?}")]
    InvalidKey(String),
}

/// Cache key builders.
pub mod keys {
    use crate::services::calendar::{api_date, YearMonth};
    use chrono::NaiveDate;
    use sha2::{Digest, Sha256};

    /// Profile entries are keyed by a digest of the access token, since the
    /// user ID is only known after the profile is fetched.
    pub fn profile(access_token: &str) -> String {
        let digest = Sha256::digest(access_token.as_bytes());
        format!("profile:{}", hex::encode(digest))
    }

    pub fn storyline(user_id: u64, date: NaiveDate) -> String {
        format!("{}:{}", user_id, api_date(date))
    }

    pub fn summary_month(user_id: u64, month: YearMonth) -> String {
        format!("{}:{}", user_id, month)
    }

}
