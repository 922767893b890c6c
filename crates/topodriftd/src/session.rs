//! Epoch-keyed report caching.
//!
//! The cache itself is the caller-owned collaborator from `recon-core`;
//! this wrapper just fixes the key scheme and TTL the daemon uses for
//! processed reports.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use recon_core::{ReconError, ReconReport, ReconResult, SessionCache};

/// Default lifetime for cached processed reports.
pub const DEFAULT_REPORT_TTL: Duration = Duration::from_secs(15 * 60);

/// Session-scoped store for processed reconciliation reports.
pub struct SessionStore {
    cache: Arc<dyn SessionCache>,
    ttl: Duration,
}

impl SessionStore {
    /// Wraps a cache with the default report TTL.
    pub fn new(cache: Arc<dyn SessionCache>) -> Self {
        Self {
            cache,
            ttl: DEFAULT_REPORT_TTL,
        }
    }

    /// Overrides the report TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    fn report_key(epoch: u64) -> String {
        format!("report:{}", epoch)
    }

    /// Fetches the cached report for an epoch, if still live.
    pub async fn cached_report(&self, epoch: u64) -> ReconResult<Option<Value>> {
        let hit = self.cache.fetch(&Self::report_key(epoch)).await?;
        if hit.is_some() {
            debug!("Cache hit for epoch {}", epoch);
        }
        Ok(hit)
    }

    /// Stores a processed report under its epoch.
    pub async fn store_report(&self, epoch: u64, report: &ReconReport) -> ReconResult<()> {
        let value = serde_json::to_value(report)
            .map_err(|e| ReconError::cache("store", format!("serialize report: {e}")))?;
        self.cache
            .store(&Self::report_key(epoch), value, self.ttl)
            .await?;
        info!("Cached report for epoch {} (ttl {:?})", epoch, self.ttl);
        Ok(())
    }

    /// Drops the cached report for an epoch.
    pub async fn invalidate(&self, epoch: u64) -> ReconResult<()> {
        self.cache.invalidate(&Self::report_key(epoch)).await
    }
}
