//! Full-dataset pagination cache.
//!
//! Resource tables in the console page through datasets that the backend
//! only serves in bulk. The cache fetches the entire set once, then serves
//! every subsequent page as a slice of the cached vector. Writes to the
//! underlying resources must call [`PageCache::invalidate`]; the cache has
//! no TTL and never refetches on its own.

use std::collections::BTreeSet;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cursor::{decode_cursor, encode_cursor};
use crate::error::Result;

/// Upper bound on the one-shot bulk fetch.
pub const DEFAULT_FULL_FETCH_LIMIT: usize = 10_000;

/// Source of truth the cache populates itself from.
///
/// Implementations fetch a window of resources from the backend. The cache
/// issues a single call with `offset` 0 and a large `limit` to pull the
/// whole dataset.
pub trait ResourceFetcher: Send + Sync {
    /// Resource type served by this fetcher.
    type Item: ResourceItem;

    /// Fetches up to `limit` items starting at `offset`.
    fn fetch(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Self::Item>>> + Send;
}

/// A cacheable resource with the facets the console filters on.
pub trait ResourceItem: Clone + Send + Sync {
    /// Pool the resource belongs to, if any.
    fn pool(&self) -> Option<&str>;

    /// Platform the resource runs on, if any.
    fn platform(&self) -> Option<&str>;
}

/// Configuration for a [`PageCache`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCacheConfig {
    /// Limit passed to the bulk fetch that populates the cache.
    pub full_fetch_limit: usize,
}

impl Default for PageCacheConfig {
    fn default() -> Self {
        Self {
            full_fetch_limit: DEFAULT_FULL_FETCH_LIMIT,
        }
    }
}

/// A page request, addressed by cursor or by raw offset.
///
/// When both are present the cursor wins; a missing cursor and offset means
/// the first page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageRequest {
    /// Opaque cursor from a previous [`Page::next_cursor`].
    pub cursor: Option<String>,
    /// Raw offset, used when no cursor is given.
    pub offset: Option<usize>,
    /// Maximum number of items to return.
    pub limit: usize,
}

impl PageRequest {
    /// Builds a first-page request with the given limit.
    #[must_use]
    pub fn first(limit: usize) -> Self {
        Self {
            cursor: None,
            offset: None,
            limit,
        }
    }

    /// Builds a request continuing from a cursor.
    #[must_use]
    pub fn from_cursor(cursor: impl Into<String>, limit: usize) -> Self {
        Self {
            cursor: Some(cursor.into()),
            offset: None,
            limit,
        }
    }

    fn resolve_offset(&self) -> usize {
        match (&self.cursor, self.offset) {
            (Some(cursor), _) => decode_cursor(cursor),
            (None, Some(offset)) => offset,
            (None, None) => 0,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Whether another page is likely to exist.
    ///
    /// Inferred from a full slice: a page that came back exactly `limit`
    /// long reports `true` even when it happens to be the final page. The
    /// follow-up request then returns an empty page with `has_more` false.
    pub has_more: bool,
    /// Cursor for the next page, present when `has_more` is true.
    pub next_cursor: Option<String>,
}

struct CacheState<T> {
    items: Vec<T>,
    valid: bool,
    pools: BTreeSet<String>,
    platforms: BTreeSet<String>,
}

impl<T> Default for CacheState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            valid: false,
            pools: BTreeSet::new(),
            platforms: BTreeSet::new(),
        }
    }
}

/// Caches a full resource dataset and serves pages from it.
///
/// Callers on a single task see at most one upstream fetch between
/// invalidations. Concurrent first-page requests may race into duplicate
/// fetches; the last write wins and both callers see a consistent dataset.
pub struct PageCache<F: ResourceFetcher> {
    fetcher: F,
    config: PageCacheConfig,
    state: RwLock<CacheState<F::Item>>,
}

impl<F: ResourceFetcher> PageCache<F> {
    /// Creates a cache with the default configuration.
    pub fn new(fetcher: F) -> Self {
        Self::with_config(fetcher, PageCacheConfig::default())
    }

    /// Creates a cache with a custom configuration.
    pub fn with_config(fetcher: F, config: PageCacheConfig) -> Self {
        Self {
            fetcher,
            config,
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Serves one page, populating the cache on first use.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache is empty and the upstream fetch
    /// fails. The cache stays invalid, so the next request retries.
    pub async fn page(&self, request: &PageRequest) -> Result<Page<F::Item>> {
        self.ensure_populated().await?;

        let offset = request.resolve_offset();
        let state = self.state.read();
        let start = offset.min(state.items.len());
        let end = start.saturating_add(request.limit).min(state.items.len());
        let items = state.items[start..end].to_vec();

        let has_more = items.len() == request.limit && request.limit > 0;
        let next_cursor = has_more.then(|| encode_cursor(end));
        Ok(Page {
            items,
            has_more,
            next_cursor,
        })
    }

    /// Drops the cached dataset. The next page request refetches.
    pub fn invalidate(&self) {
        debug!("invalidating cached dataset");
        *self.state.write() = CacheState::default();
    }

    /// Whether the cache currently holds a dataset.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.state.read().valid
    }

    /// Distinct pools across the cached dataset, sorted.
    #[must_use]
    pub fn pools(&self) -> Vec<String> {
        self.state.read().pools.iter().cloned().collect()
    }

    /// Distinct platforms across the cached dataset, sorted.
    #[must_use]
    pub fn platforms(&self) -> Vec<String> {
        self.state.read().platforms.iter().cloned().collect()
    }

    /// Total number of cached items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().items.len()
    }

    /// Whether the cached dataset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().items.is_empty()
    }

    async fn ensure_populated(&self) -> Result<()> {
        if self.state.read().valid {
            return Ok(());
        }

        // Fetch without holding the lock; guards must not live across await.
        let items = self.fetcher.fetch(0, self.config.full_fetch_limit).await?;
        debug!(count = items.len(), "populated pagination cache");

        let pools = items
            .iter()
            .filter_map(|item| item.pool().map(str::to_owned))
            .collect();
        let platforms = items
            .iter()
            .filter_map(|item| item.platform().map(str::to_owned))
            .collect();

        *self.state.write() = CacheState {
            items,
            valid: true,
            pools,
            platforms,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaginateError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq)]
    struct Worker {
        name: String,
        pool: String,
        platform: String,
    }

    impl ResourceItem for Worker {
        fn pool(&self) -> Option<&str> {
            Some(&self.pool)
        }

        fn platform(&self) -> Option<&str> {
            Some(&self.platform)
        }
    }

    struct CountingFetcher {
        workers: Vec<Worker>,
        calls: AtomicUsize,
    }

    impl CountingFetcher {
        fn with_workers(count: usize) -> Self {
            let workers = (0..count)
                .map(|i| Worker {
                    name: format!("worker-{i}"),
                    pool: format!("pool-{}", i % 3),
                    platform: if i % 2 == 0 { "linux" } else { "macos" }.to_string(),
                })
                .collect();
            Self {
                workers,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ResourceFetcher for CountingFetcher {
        type Item = Worker;

        async fn fetch(&self, offset: usize, limit: usize) -> Result<Vec<Worker>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let end = (offset + limit).min(self.workers.len());
            Ok(self.workers[offset..end].to_vec())
        }
    }

    struct FailingFetcher;

    impl ResourceFetcher for FailingFetcher {
        type Item = Worker;

        async fn fetch(&self, _offset: usize, _limit: usize) -> Result<Vec<Worker>> {
            Err(PaginateError::Fetch("backend unavailable".into()))
        }
    }

    // ===== Single-fetch guarantee =====

    #[tokio::test]
    async fn pages_after_the_first_do_not_refetch() {
        let cache = PageCache::new(CountingFetcher::with_workers(25));

        let first = cache.page(&PageRequest::first(10)).await.unwrap();
        assert_eq!(first.items.len(), 10);
        assert!(first.has_more);

        let cursor = first.next_cursor.unwrap();
        let second = cache
            .page(&PageRequest::from_cursor(cursor, 10))
            .await
            .unwrap();
        assert_eq!(second.items[0].name, "worker-10");

        let cursor = second.next_cursor.unwrap();
        let third = cache
            .page(&PageRequest::from_cursor(cursor, 10))
            .await
            .unwrap();
        assert_eq!(third.items.len(), 5);
        assert!(!third.has_more);
        assert!(third.next_cursor.is_none());

        assert_eq!(cache.fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_a_refetch() {
        let cache = PageCache::new(CountingFetcher::with_workers(5));

        cache.page(&PageRequest::first(5)).await.unwrap();
        assert!(cache.is_valid());

        cache.invalidate();
        assert!(!cache.is_valid());
        assert!(cache.is_empty());

        cache.page(&PageRequest::first(5)).await.unwrap();
        assert_eq!(cache.fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_cache_invalid() {
        let cache = PageCache::new(FailingFetcher);
        let result = cache.page(&PageRequest::first(10)).await;
        assert!(result.is_err());
        assert!(!cache.is_valid());
    }

    // ===== Page addressing =====

    #[tokio::test]
    async fn raw_offset_is_used_when_no_cursor_is_given() {
        let cache = PageCache::new(CountingFetcher::with_workers(20));
        let request = PageRequest {
            cursor: None,
            offset: Some(15),
            limit: 10,
        };
        let page = cache.page(&request).await.unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].name, "worker-15");
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn cursor_takes_precedence_over_offset() {
        let cache = PageCache::new(CountingFetcher::with_workers(20));
        let request = PageRequest {
            cursor: Some(crate::cursor::encode_cursor(5)),
            offset: Some(15),
            limit: 3,
        };
        let page = cache.page(&request).await.unwrap();
        assert_eq!(page.items[0].name, "worker-5");
    }

    #[tokio::test]
    async fn malformed_cursor_serves_the_first_page() {
        let cache = PageCache::new(CountingFetcher::with_workers(10));
        let request = PageRequest::from_cursor("garbage!!", 4);
        let page = cache.page(&request).await.unwrap();
        assert_eq!(page.items[0].name, "worker-0");
    }

    #[tokio::test]
    async fn offset_past_the_end_yields_an_empty_page() {
        let cache = PageCache::new(CountingFetcher::with_workers(10));
        let request = PageRequest {
            cursor: None,
            offset: Some(500),
            limit: 10,
        };
        let page = cache.page(&request).await.unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_more);
    }

    // ===== has_more heuristic =====

    #[tokio::test]
    async fn exact_multiple_reports_a_phantom_final_page() {
        let cache = PageCache::new(CountingFetcher::with_workers(10));

        let first = cache.page(&PageRequest::first(10)).await.unwrap();
        assert_eq!(first.items.len(), 10);
        // Full slice, so the heuristic says there is more.
        assert!(first.has_more);

        let next = cache
            .page(&PageRequest::from_cursor(first.next_cursor.unwrap(), 10))
            .await
            .unwrap();
        assert!(next.items.is_empty());
        assert!(!next.has_more);
    }

    #[tokio::test]
    async fn zero_limit_never_reports_more() {
        let cache = PageCache::new(CountingFetcher::with_workers(10));
        let page = cache.page(&PageRequest::first(0)).await.unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_more);
    }

    // ===== Derived facets =====

    #[tokio::test]
    async fn pools_and_platforms_are_distinct_and_sorted() {
        let cache = PageCache::new(CountingFetcher::with_workers(12));
        cache.page(&PageRequest::first(1)).await.unwrap();

        assert_eq!(cache.pools(), vec!["pool-0", "pool-1", "pool-2"]);
        assert_eq!(cache.platforms(), vec!["linux", "macos"]);
        assert_eq!(cache.len(), 12);
    }
}
