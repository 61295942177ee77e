//! Single-slot table cache.
//!
//! The whole read-check-refetch-replace sequence runs under one async
//! mutex: within the TTL repeated reads return the cached table with no
//! refresh, and concurrent callers can neither race duplicate refreshes
//! nor observe a half-written entry.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::warn;

use crate::error::DashboardResult;
use crate::types::Table;

struct CacheEntry {
    table: Arc<Table>,
    fetched_at: Instant,
}

pub struct TableCache {
    ttl: Duration,
    slot: Mutex<Option<CacheEntry>>,
}

impl TableCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached table, refreshing it via `refresh` when the entry
    /// is missing or older than the TTL.
    ///
    /// A failed refresh keeps the previous entry and serves it stale (the
    /// entry's timestamp is not renewed, so the next call retries); the
    /// error only reaches the caller when the cache has never been
    /// populated.
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> DashboardResult<Arc<Table>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = DashboardResult<Table>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(entry) = slot.as_ref() {
            if entry.fetched_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&entry.table));
            }
        }

        match refresh().await {
            Ok(table) => {
                let table = Arc::new(table);
                *slot = Some(CacheEntry {
                    table: Arc::clone(&table),
                    fetched_at: Instant::now(),
                });
                Ok(table)
            }
            Err(err) => match slot.as_ref() {
                Some(entry) => {
                    warn!(error = %err, "refresh failed, serving stale table");
                    Ok(Arc::clone(&entry.table))
                }
                None => Err(err),
            },
        }
    }

    pub async fn is_populated(&self) -> bool {
        self.slot.lock().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn table() -> Table {
        Table::new(vec!["Name".to_string()])
    }

    #[tokio::test]
    async fn test_second_read_within_ttl_skips_refresh() {
        let cache = TableCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        let calls = &calls;

        for _ in 0..3 {
            let got = cache
                .get_or_refresh(|| async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(table())
                })
                .await
                .unwrap();
            assert_eq!(got.columns(), &["Name"]);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_triggers_refresh() {
        let cache = TableCache::new(Duration::from_secs(0));
        let calls = AtomicUsize::new(0);
        let calls = &calls;

        for _ in 0..2 {
            cache
                .get_or_refresh(|| async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(table())
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_serves_stale_table() {
        let cache = TableCache::new(Duration::from_secs(0));

        cache.get_or_refresh(|| async { Ok(table()) }).await.unwrap();
        let got = cache
            .get_or_refresh(|| async {
                Err(DashboardError::Sheet("upstream gone".to_string()))
            })
            .await
            .unwrap();

        assert_eq!(got.columns(), &["Name"]);
        assert!(cache.is_populated().await);
    }

    #[tokio::test]
    async fn test_failed_first_refresh_propagates() {
        let cache = TableCache::new(Duration::from_secs(60));

        let err = cache
            .get_or_refresh(|| async {
                Err(DashboardError::Sheet("upstream gone".to_string()))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DashboardError::Sheet(_)));
        assert!(!cache.is_populated().await);
    }
}
