//! Process-wide request cache for note pages
//!
//! A thin wrapper over `moka`'s sync cache. Eviction is entirely moka's: a
//! capacity bound plus a time-to-live. Callers only get, insert, seed and
//! invalidate; entries are never mutated in place.

use super::key::QueryKey;
use crate::api::NotesPage;
use moka::sync::Cache;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

/// Default time-to-live for cached pages
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);
/// Default maximum number of cached pages
pub const DEFAULT_CAPACITY: u64 = 256;

static SHARED: OnceLock<QueryCache> = OnceLock::new();

/// A cached page and when it was fetched
#[derive(Debug, Clone)]
pub struct CachedPage {
    pub page: Arc<NotesPage>,
    pub fetched_at: Instant,
}

impl CachedPage {
    /// Whether the entry is at least `stale_after` old at `now`
    #[must_use]
    pub fn is_stale(&self, stale_after: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) >= stale_after
    }
}

/// Cache of note pages keyed by [`QueryKey`]
///
/// Cloning is cheap and clones share the same storage.
#[derive(Clone)]
pub struct QueryCache {
    inner: Cache<QueryKey, CachedPage>,
}

impl QueryCache {
    /// Create a standalone cache
    #[must_use]
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let inner = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(max_capacity)
            .build();
        Self { inner }
    }

    /// The process-wide cache
    ///
    /// The first caller's settings win; later calls return the same cache.
    #[must_use]
    pub fn shared(ttl: Duration, max_capacity: u64) -> Self {
        SHARED
            .get_or_init(|| {
                tracing::debug!(?ttl, max_capacity, "initializing shared query cache");
                Self::new(ttl, max_capacity)
            })
            .clone()
    }

    /// Look up a page
    #[must_use]
    pub fn get(&self, key: &QueryKey) -> Option<CachedPage> {
        self.inner.get(key)
    }

    /// Store a freshly fetched page, replacing any previous entry
    pub fn insert(&self, key: QueryKey, page: NotesPage) -> Arc<NotesPage> {
        let page = Arc::new(page);
        self.inner.insert(
            key,
            CachedPage {
                page: Arc::clone(&page),
                fetched_at: Instant::now(),
            },
        );
        page
    }

    /// Store a page only if the key has no entry yet
    ///
    /// Returns the entry now in the cache, which is the existing one when
    /// the key was already present.
    pub fn seed(&self, key: QueryKey, page: NotesPage) -> CachedPage {
        self.inner.get_with(key, || CachedPage {
            page: Arc::new(page),
            fetched_at: Instant::now(),
        })
    }

    /// Drop every cached page
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_page;

    fn key(page: u32) -> QueryKey {
        QueryKey::new("", None, page)
    }

    #[test]
    fn test_insert_and_get() {
        let cache = QueryCache::default();
        cache.insert(key(1), sample_page(3, 2));

        let entry = cache.get(&key(1)).unwrap();
        assert_eq!(entry.page.notes.len(), 3);
        assert!(cache.get(&key(2)).is_none());
    }

    #[test]
    fn test_seed_does_not_overwrite() {
        let cache = QueryCache::default();
        cache.insert(key(1), sample_page(3, 2));

        let entry = cache.seed(key(1), sample_page(5, 9));
        assert_eq!(entry.page.notes.len(), 3);
        assert_eq!(cache.get(&key(1)).unwrap().page.total_pages, 2);
    }

    #[test]
    fn test_seed_fills_missing_key() {
        let cache = QueryCache::default();
        let entry = cache.seed(key(4), sample_page(1, 4));
        assert_eq!(entry.page.total_pages, 4);
        assert!(cache.get(&key(4)).is_some());
    }

    #[test]
    fn test_invalidate_all() {
        let cache = QueryCache::default();
        cache.insert(key(1), sample_page(1, 1));
        cache.insert(key(2), sample_page(1, 1));

        cache.invalidate_all();
        assert!(cache.get(&key(1)).is_none());
        assert!(cache.get(&key(2)).is_none());
    }

    #[test]
    fn test_clones_share_storage() {
        let cache = QueryCache::default();
        let other = cache.clone();
        cache.insert(key(1), sample_page(2, 1));
        assert!(other.get(&key(1)).is_some());
    }

    #[test]
    fn test_shared_returns_same_storage() {
        let a = QueryCache::shared(DEFAULT_TTL, DEFAULT_CAPACITY);
        let b = QueryCache::shared(Duration::from_secs(1), 1);
        let k = QueryKey::new("shared-cache-test", None, 1);
        a.insert(k.clone(), sample_page(1, 1));
        assert!(b.get(&k).is_some());
    }

    #[test]
    fn test_staleness() {
        let entry = CachedPage {
            page: Arc::new(sample_page(1, 1)),
            fetched_at: Instant::now(),
        };
        let later = entry.fetched_at + Duration::from_secs(10);
        assert!(entry.is_stale(Duration::ZERO, entry.fetched_at));
        assert!(!entry.is_stale(Duration::from_secs(30), later));
        assert!(entry.is_stale(Duration::from_secs(5), later));
    }
}
