//! Time-bounded memoization of another source.

use super::RecordSource;
use crate::domain::RecordSet;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Serves the inner source's table until it is older than `ttl`.
///
/// Concurrent fetches serialize on the cache slot, so an expired entry is
/// refreshed once. Failed fetches are not cached.
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    slot: Mutex<Option<(Instant, RecordSet)>>,
}

impl<S: RecordSource> CachedSource<S> {
    /// Wrap `inner`, keeping each fetched table for `ttl`.
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// How long a fetched table is served.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drop the cached table so the next fetch hits the inner source.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
        tracing::debug!(source = %self.inner.describe(), "Cache invalidated");
    }
}

#[async_trait]
impl<S: RecordSource> RecordSource for CachedSource<S> {
    async fn fetch(&self) -> Result<RecordSet> {
        let mut slot = self.slot.lock().await;

        if let Some((loaded_at, records)) = slot.as_ref()
            && loaded_at.elapsed() < self.ttl
        {
            tracing::debug!(source = %self.inner.describe(), "Cache hit");
            return Ok(records.clone());
        }

        tracing::debug!(source = %self.inner.describe(), "Cache miss");
        let records = self.inner.fetch().await?;
        *slot = Some((Instant::now(), records.clone()));
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("{} (cached {}s)", self.inner.describe(), self.ttl.as_secs())
    }
}
