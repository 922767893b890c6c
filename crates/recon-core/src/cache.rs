//! Session cache collaborator interface.
//!
//! The surrounding service caches raw and processed documents between
//! requests; the reconciliation core stays a pure function and never
//! reads a cache implicitly. The trait is the explicit seam the caller
//! owns, and [`MemoryCache`] is the in-process implementation.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::error::ReconResult;

/// Caller-owned cache for raw/processed documents.
#[async_trait]
pub trait SessionCache: Send + Sync {
    /// Stores a value under a key with a time-to-live.
    async fn store(&self, key: &str, value: Value, ttl: Duration) -> ReconResult<()>;

    /// Fetches a value, or `None` if absent or expired.
    async fn fetch(&self, key: &str) -> ReconResult<Option<Value>>;

    /// Removes a key.
    async fn invalidate(&self, key: &str) -> ReconResult<()>;
}

struct Entry {
    value: Value,
    deadline: Instant,
}

/// In-memory session cache with per-entry expiry.
///
/// Expiry is checked on fetch; there is no background sweeper, so an
/// entry that is never fetched again occupies memory until invalidated
/// or overwritten.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held (including not-yet-reaped expired ones).
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SessionCache for MemoryCache {
    async fn store(&self, key: &str, value: Value, ttl: Duration) -> ReconResult<()> {
        let deadline = Instant::now() + ttl;
        self.entries
            .write()
            .await
            .insert(key.to_string(), Entry { value, deadline });
        debug!("Cached {} (ttl {:?})", key, ttl);
        Ok(())
    }

    async fn fetch(&self, key: &str) -> ReconResult<Option<Value>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if entry.deadline > Instant::now() => {
                    return Ok(Some(entry.value.clone()))
                }
                Some(_) => {} // expired; fall through to reap
            }
        }
        self.entries.write().await.remove(key);
        debug!("Expired cache entry {}", key);
        Ok(None)
    }

    async fn invalidate(&self, key: &str) -> ReconResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
