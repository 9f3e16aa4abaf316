//! Response cache with request deduplication and ordering.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::time::Instant;

use crate::models::{GraphData, RelationshipResponse};
use crate::source::{FetchOptions, RelationshipSource, SourceError};

/// One logical fetch: asset id plus the options it was requested with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub asset_id: String,
    pub options: FetchOptions,
}

type FetchResult = Result<Arc<RelationshipResponse>, Arc<SourceError>>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

struct CacheEntry {
    response: Arc<RelationshipResponse>,
    fetched_at: Instant,
}

/// The graph most recently committed by the orchestrator.
#[derive(Clone)]
pub struct CurrentGraph {
    pub asset_id: String,
    pub graph: Arc<GraphData>,
}

struct CacheInner {
    entries: HashMap<CacheKey, CacheEntry>,
    inflight: HashMap<CacheKey, SharedFetch>,
    current: Option<CurrentGraph>,
}

/// Shared cache of raw relationship responses plus the current built graph.
///
/// Cloning is cheap; every clone observes the same state. Concurrent
/// requests for one key share a single upstream call, and each load carries
/// a monotonic generation tag so a superseded request that settles late can
/// never overwrite state committed by a newer one.
#[derive(Clone)]
pub struct GraphCache {
    inner: Arc<Mutex<CacheInner>>,
    generation: Arc<AtomicU64>,
    committed: Arc<AtomicU64>,
    ttl: Duration,
}

impl GraphCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                entries: HashMap::new(),
                inflight: HashMap::new(),
                current: None,
            })),
            generation: Arc::new(AtomicU64::new(0)),
            committed: Arc::new(AtomicU64::new(0)),
            ttl,
        }
    }

    /// Marks the start of a load and returns its generation tag.
    pub fn begin_request(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True when `generation` is still the newest observed; records it as
    /// committed. A request superseded by a later commit gets `false` and
    /// must discard its result.
    pub fn try_commit(&self, generation: u64) -> bool {
        self.committed.fetch_max(generation, Ordering::SeqCst) <= generation
    }

    /// Fetches through the cache, deduplicating concurrent requests for the
    /// same key. A fresh cached response short-circuits the upstream call
    /// entirely; a stale one is dropped and refetched.
    pub async fn fetch(&self, source: Arc<dyn RelationshipSource>, key: CacheKey) -> FetchResult {
        let shared = {
            let mut inner = self.lock();

            if let Some(entry) = inner.entries.get(&key) {
                if entry.fetched_at.elapsed() < self.ttl {
                    tracing::debug!(asset_id = %key.asset_id, "relationship cache hit");
                    return Ok(entry.response.clone());
                }
                inner.entries.remove(&key);
            }

            if let Some(inflight) = inner.inflight.get(&key) {
                tracing::debug!(asset_id = %key.asset_id, "joining in-flight fetch");
                inflight.clone()
            } else {
                let cache = self.clone();
                let fetch_key = key.clone();
                let fetch = async move {
                    let result = source
                        .fetch_relationships(&fetch_key.asset_id, &fetch_key.options)
                        .await
                        .map(Arc::new)
                        .map_err(Arc::new);
                    cache.settle(&fetch_key, &result);
                    result
                }
                .boxed()
                .shared();
                inner.inflight.insert(key.clone(), fetch.clone());
                fetch
            }
        };

        shared.await
    }

    fn settle(&self, key: &CacheKey, result: &FetchResult) {
        let mut inner = self.lock();
        inner.inflight.remove(key);
        if let Ok(response) = result {
            inner.entries.insert(
                key.clone(),
                CacheEntry {
                    response: response.clone(),
                    fetched_at: Instant::now(),
                },
            );
        }
    }

    /// Drops a cached response, forcing the next load to hit the upstream.
    pub fn invalidate(&self, key: &CacheKey) {
        self.lock().entries.remove(key);
    }

    /// Replaces the current graph snapshot.
    pub fn set_current(&self, asset_id: String, graph: Arc<GraphData>) {
        self.lock().current = Some(CurrentGraph { asset_id, graph });
    }

    pub fn current(&self) -> Option<CurrentGraph> {
        self.lock().current.clone()
    }

    pub fn current_graph(&self) -> Option<Arc<GraphData>> {
        self.lock().current.as_ref().map(|c| c.graph.clone())
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;

    use crate::models::RelationshipResponse;
    use crate::source::{FetchOptions, RelationshipSource, SourceError};

    struct CountingSource {
        calls: AtomicUsize,
        delay: Duration,
    }

    impl CountingSource {
        fn new(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                delay,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RelationshipSource for CountingSource {
        async fn fetch_relationships(
            &self,
            asset_id: &str,
            _options: &FetchOptions,
        ) -> Result<RelationshipResponse, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(RelationshipResponse::for_root(asset_id, "Asset"))
        }
    }

    fn key_for(asset_id: &str) -> CacheKey {
        CacheKey {
            asset_id: asset_id.to_string(),
            options: FetchOptions::default(),
        }
    }

    #[tokio::test]
    async fn fresh_entry_short_circuits_the_upstream() {
        let source = CountingSource::new(Duration::ZERO);
        let cache = GraphCache::new(Duration::from_secs(60));

        let first = cache
            .fetch(source.clone(), key_for("a1"))
            .await
            .expect("fetch");
        let second = cache
            .fetch(source.clone(), key_for("a1"))
            .await
            .expect("fetch");

        assert_eq!(source.calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_entry_is_refetched() {
        let source = CountingSource::new(Duration::ZERO);
        let cache = GraphCache::new(Duration::from_secs(60));

        cache
            .fetch(source.clone(), key_for("a1"))
            .await
            .expect("fetch");
        tokio::time::advance(Duration::from_secs(61)).await;
        cache
            .fetch(source.clone(), key_for("a1"))
            .await
            .expect("fetch");

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_requests_share_one_upstream_call() {
        let source = CountingSource::new(Duration::from_millis(100));
        let cache = GraphCache::new(Duration::from_secs(60));

        let (first, second) = tokio::join!(
            cache.fetch(source.clone(), key_for("a1")),
            cache.fetch(source.clone(), key_for("a1")),
        );

        assert_eq!(source.calls(), 1);
        assert!(first.is_ok());
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn distinct_keys_fetch_separately() {
        let source = CountingSource::new(Duration::ZERO);
        let cache = GraphCache::new(Duration::from_secs(60));

        cache
            .fetch(source.clone(), key_for("a1"))
            .await
            .expect("fetch");
        let mut deeper = key_for("a1");
        deeper.options.max_depth = 5;
        cache.fetch(source.clone(), deeper).await.expect("fetch");

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_a_refetch() {
        let source = CountingSource::new(Duration::ZERO);
        let cache = GraphCache::new(Duration::from_secs(60));

        cache
            .fetch(source.clone(), key_for("a1"))
            .await
            .expect("fetch");
        cache.invalidate(&key_for("a1"));
        cache
            .fetch(source.clone(), key_for("a1"))
            .await
            .expect("fetch");

        assert_eq!(source.calls(), 2);
    }

    #[test]
    fn generations_are_monotonic_and_superseded_commits_fail() {
        let cache = GraphCache::new(Duration::from_secs(60));
        let first = cache.begin_request();
        let second = cache.begin_request();
        assert!(second > first);

        assert!(cache.try_commit(second));
        assert!(!cache.try_commit(first));
        // committing the same generation again is harmless
        assert!(cache.try_commit(second));
    }
}
